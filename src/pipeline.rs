use crate::error::{Result, SplitError, SplitFailure, SplitStage};
use crate::naming::{NameVars, NamingTemplate};
use crate::page_range::PageIndexSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Something pages can be isolated from.
pub trait PageSource {
    /// A standalone document holding exactly one page.
    type Page;

    fn page_count(&self) -> u32;

    /// Produce a document containing only the page at zero-based `index`.
    fn extract_page(&self, index: u32) -> Result<Self::Page>;
}

/// Something that persists single-page documents.
pub trait PageSink<P> {
    /// Write `page` to `path`, replacing any existing file.
    fn write(&self, page: P, path: &Path) -> Result<()>;
}

/// Emitted once per written output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
}

/// Cooperative cancellation, checked before each page.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything one split needs, owned by that split alone.
#[derive(Debug)]
pub struct ExtractionJob<S> {
    pub source: S,
    pub pages: PageIndexSet,
    pub template: NamingTemplate,
    pub out_dir: PathBuf,
    /// Source file name without directory or extension.
    pub base: String,
}

impl<S: PageSource> ExtractionJob<S> {
    /// Destination for the page at zero-based `index`, written `seq`-th.
    pub fn output_path(&self, seq: u32, index: u32) -> Result<PathBuf> {
        let name = self.template.render(&NameVars {
            base: &self.base,
            num: seq,
            page: index + 1,
        })?;
        Ok(self.out_dir.join(name))
    }

    /// Extract and write every selected page in ascending order.
    ///
    /// Stops at the first failure. Files written before it are left on disk
    /// and listed in the returned [`SplitFailure`].
    pub fn run<K>(
        self,
        sink: &K,
        mut progress: Option<&mut dyn FnMut(ProgressEvent)>,
        cancel: Option<&CancelToken>,
    ) -> std::result::Result<Vec<PathBuf>, SplitFailure>
    where
        K: PageSink<S::Page>,
    {
        let total = self.pages.len();
        let mut written = Vec::with_capacity(total);

        for (seq, index) in (1u32..).zip(self.pages.iter()) {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(completed = written.len(), total, "split cancelled");
                return Err(fail(SplitError::Cancelled, written));
            }

            let path = match self.output_path(seq, index) {
                Ok(p) => p,
                Err(e) => return Err(fail(e, written)),
            };

            let page = match self.source.extract_page(index) {
                Ok(p) => p,
                Err(e) => return Err(fail(e, written)),
            };

            if let Err(e) = sink.write(page, &path) {
                return Err(fail(e, written));
            }
            debug!(page = index + 1, seq, path = %path.display(), "wrote page");
            written.push(path);

            if let Some(cb) = progress.as_deref_mut() {
                cb(ProgressEvent {
                    completed: written.len(),
                    total,
                });
            }
        }

        Ok(written)
    }
}

fn fail(error: SplitError, written: Vec<PathBuf>) -> SplitFailure {
    SplitFailure::new(SplitStage::Extracting, error).with_written(written)
}
