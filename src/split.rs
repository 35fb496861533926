//! Single-document split: the entry point used by the CLI and the MCP server.
//!
//! A split moves through `Idle → Validating → Resolving → Extracting → Done`.
//! Any failure ends it, and the returned [`SplitFailure`] records the stage
//! and whatever was written before the failure. There are no retries; call
//! [`split`] again from the top.

use crate::error::{SplitError, SplitFailure, SplitStage};
use crate::naming::{default_template, NamingTemplate};
use crate::page_range::resolve;
use crate::pdf::{PdfDocument, PdfWriter};
use crate::pipeline::{CancelToken, ExtractionJob, PageSource, ProgressEvent};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Caller-tunable parts of a split. Every field defaults to the documented
/// behaviour when `None`.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Destination directory; the source's own directory when unset.
    pub out_dir: Option<PathBuf>,
    /// Naming template; `{base}_{num:03d}` plus the source extension when unset.
    pub template: Option<String>,
    /// Page selection like `1-3,5`; every page when unset or blank.
    pub pages: Option<String>,
}

/// One output a split would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOutput {
    /// 1-based page number in the source.
    pub page: u32,
    pub path: PathBuf,
}

/// Split `source` into one PDF per selected page.
///
/// Returns the written paths in page order. Existing files with the same
/// name are overwritten.
pub fn split<P: AsRef<Path>>(
    source: P,
    options: &SplitOptions,
    progress: Option<&mut dyn FnMut(ProgressEvent)>,
    cancel: Option<&CancelToken>,
) -> Result<Vec<PathBuf>, SplitFailure> {
    let source = source.as_ref();
    let job = prepare(source, options).inspect_err(|f| report(source, f))?;

    debug!(stage = %SplitStage::Extracting, out_dir = %job.out_dir.display(), "creating output directory");
    std::fs::create_dir_all(&job.out_dir).map_err(|e| {
        let failure = SplitFailure::new(
            SplitStage::Extracting,
            SplitError::Io {
                path: job.out_dir.clone(),
                source: e,
            },
        );
        report(source, &failure);
        failure
    })?;

    let written = job
        .run(&PdfWriter, progress, cancel)
        .inspect_err(|f| report(source, f))?;

    debug!(stage = %SplitStage::Done, "split finished");
    info!(
        source = %source.display(),
        outputs = written.len(),
        "split complete"
    );
    Ok(written)
}

/// Run every check `split` runs and list the outputs it would write,
/// without touching the file system.
pub fn plan<P: AsRef<Path>>(source: P, options: &SplitOptions) -> Result<Vec<PlannedOutput>, SplitFailure> {
    let job = prepare(source.as_ref(), options)?;
    job.pages
        .iter()
        .zip(1u32..)
        .map(|(index, seq)| {
            Ok(PlannedOutput {
                page: index + 1,
                path: job.output_path(seq, index)?,
            })
        })
        .collect::<Result<_, SplitError>>()
        .map_err(|e| SplitFailure::new(SplitStage::Extracting, e))
}

/// Validate the source and options and build the job, without writing anything.
pub fn prepare(source: &Path, options: &SplitOptions) -> Result<ExtractionJob<PdfDocument>, SplitFailure> {
    debug!(stage = %SplitStage::Validating, source = %source.display(), "validating");
    if !source.is_file() {
        return Err(SplitFailure::new(
            SplitStage::Validating,
            SplitError::NotFound {
                path: source.to_path_buf(),
            },
        ));
    }

    let template = match &options.template {
        Some(t) => t.clone(),
        None => default_template(source.extension().and_then(|e| e.to_str())),
    };
    let template = NamingTemplate::compile(&template)
        .map_err(|e| SplitFailure::new(SplitStage::Validating, e))?;

    let doc =
        PdfDocument::open(source).map_err(|e| SplitFailure::new(SplitStage::Validating, e))?;

    debug!(stage = %SplitStage::Resolving, pages = ?options.pages, "resolving selection");
    let pages = resolve(options.pages.as_deref(), doc.page_count())
        .map_err(|e| SplitFailure::new(SplitStage::Resolving, e))?;

    if pages.len() > 1 && !template.varies_per_page() {
        warn!(
            template = template.as_str(),
            "template has no num or page placeholder; outputs will overwrite each other"
        );
    }

    let out_dir = match &options.out_dir {
        Some(dir) => dir.clone(),
        None => source_dir(source),
    };

    Ok(ExtractionJob {
        base: base_name(source),
        source: doc,
        pages,
        template,
        out_dir,
    })
}

fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn base_name(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}

fn report(source: &Path, failure: &SplitFailure) {
    warn!(
        source = %source.display(),
        stage = %failure.stage,
        written = failure.written.len(),
        error = %failure.error,
        "split failed"
    );
}
