//! Split a PDF into one file per page.
//!
//! ```no_run
//! use pdfburst::{split, SplitOptions};
//!
//! let options = SplitOptions {
//!     pages: Some("1-3,5".into()),
//!     ..Default::default()
//! };
//! let written = split("report.pdf", &options, None, None)?;
//! // report_001.pdf .. report_004.pdf next to report.pdf
//! # Ok::<(), pdfburst::SplitFailure>(())
//! ```

pub mod error;
pub mod naming;
pub mod page_range;
pub mod pdf;
pub mod pipeline;
pub mod split;

pub use error::{ParseError, SplitError, SplitFailure, SplitStage};
pub use naming::{NameVars, NamingTemplate};
pub use page_range::{resolve, PageIndexSet};
pub use pipeline::{CancelToken, ExtractionJob, PageSink, PageSource, ProgressEvent};
pub use split::{plan, split, PlannedOutput, SplitOptions};
