mod document;

pub use document::{PdfDocument, PdfWriter};
