use crate::error::{Result, SplitError};
use crate::pipeline::{PageSink, PageSource};
use lopdf::{Document, ObjectId};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    /// Load a PDF, classifying failures as missing, corrupt or encrypted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SplitError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|_| SplitError::NotFound {
            path: path.to_path_buf(),
        })?;
        Self::from_bytes(&bytes, path)
    }

    /// Parse an in-memory PDF; `path` is used for error reporting only.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        let doc = match Document::load_mem(bytes) {
            Ok(doc) => doc,
            // lopdf refuses some encrypted files outright; those are still a
            // restriction, not corruption.
            Err(_) if declares_encryption(bytes) => {
                return Err(SplitError::AccessDenied {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(SplitError::CorruptDocument {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        if doc.encryption_state.is_some() || doc.trailer.has(b"Encrypt") {
            return Err(SplitError::AccessDenied {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), pages = doc.get_pages().len(), "opened PDF");
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy of the document with every page but `page` (1-based) removed.
    pub fn extract_single(&self, page: u32) -> Result<Document> {
        let total = self.page_count();
        if page == 0 || page > total {
            return Err(SplitError::Extraction {
                page,
                reason: format!("page is out of range (1-{})", total),
            });
        }

        let mut new_doc = self.doc.clone();
        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|&num| num != page)
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();

        let remaining = new_doc.get_pages().len();
        if remaining != 1 {
            return Err(SplitError::Extraction {
                page,
                reason: format!("page tree left {} pages after extraction", remaining),
            });
        }
        Ok(new_doc)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| SplitError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| io_error(std::io::Error::other(e.to_string())))?;
        std::fs::write(path, &buffer).map_err(io_error)?;
        Ok(())
    }
}

impl PageSource for PdfDocument {
    type Page = Document;

    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn extract_page(&self, index: u32) -> Result<Document> {
        self.extract_single(index + 1)
    }
}

/// Writes lopdf documents straight to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PageSink<Document> for PdfWriter {
    fn write(&self, mut page: Document, path: &Path) -> Result<()> {
        PdfDocument::save(&mut page, path)
    }
}

/// Fallback for files lopdf refuses to load: an `/Encrypt` key anywhere in
/// the raw bytes marks them as restricted rather than corrupt.
fn declares_encryption(bytes: &[u8]) -> bool {
    const KEY: &[u8] = b"/Encrypt";
    bytes.windows(KEY.len()).any(|w| w == KEY)
}
