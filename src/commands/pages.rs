use anyhow::Result;
use pdfburst::pdf::PdfDocument;
use pdfburst::{resolve, PageSource};
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, pages: Option<&str>) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let total = doc.page_count();
    let selected = resolve(pages, total)?;

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", total);
    if selected.is_empty() {
        println!("Selected: none");
    } else {
        let list: Vec<String> = selected.page_numbers().iter().map(u32::to_string).collect();
        println!("Selected ({}): {}", selected.len(), list.join(","));
    }

    Ok(())
}
