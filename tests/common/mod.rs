//! Builds small PDFs with lopdf so tests need no binary fixtures.

#![allow(dead_code)]

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};
use std::path::Path;

/// A document whose page N shows the text "Page N".
pub fn build_pdf(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

pub fn write_pdf(path: &Path, num_pages: u32) {
    let mut doc = build_pdf(num_pages);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    std::fs::write(path, buffer).unwrap();
}

/// A plain PDF whose bytes include the text `/Encrypt` in an uncompressed,
/// unreferenced content stream. Nothing about it is encrypted.
pub fn write_pdf_mentioning_encrypt(path: &Path, num_pages: u32) {
    let mut doc = build_pdf(num_pages);
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    b"the /Encrypt key".to_vec(),
                    lopdf::StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    assert!(buffer.windows(8).any(|w| w == b"/Encrypt"));
    std::fs::write(path, buffer).unwrap();
}

/// Same as [`write_pdf`] but with an `/Encrypt` dictionary in the trailer.
pub fn write_encrypted_pdf(path: &Path, num_pages: u32) {
    let mut doc = build_pdf(num_pages);
    let encrypt = Dictionary::from_iter(vec![
        ("Filter", Object::Name(b"Standard".to_vec())),
        ("V", Object::Integer(1)),
        ("R", Object::Integer(2)),
        ("O", Object::String(vec![0; 32], lopdf::StringFormat::Hexadecimal)),
        ("U", Object::String(vec![0; 32], lopdf::StringFormat::Hexadecimal)),
        ("P", Object::Integer(-44)),
    ]);
    let encrypt_id = doc.add_object(encrypt);
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    std::fs::write(path, buffer).unwrap();
}

/// Page count of `path` and the "Page N" number shown on its first page.
pub fn inspect(path: &Path) -> (usize, u32) {
    let doc = Document::load(path).unwrap();
    let pages = doc.get_pages();
    let first = *pages.values().next().unwrap();
    let content = doc.get_page_content(first).unwrap();
    let text = String::from_utf8_lossy(&content);
    let start = text.find("Page ").unwrap() + "Page ".len();
    let digits: String = text[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    (pages.len(), digits.parse().unwrap())
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
