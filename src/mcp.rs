use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pdfburst::pdf::PdfDocument;
use pdfburst::{resolve, split, PageSource, SplitOptions};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file to split")]
    pub path: String,
    #[schemars(description = "Output directory (default: the PDF's own directory)")]
    #[serde(default)]
    pub output_dir: Option<String>,
    #[schemars(
        description = "File name pattern with {base}, {num} and {page} placeholders (default: '{base}_{num:03d}.pdf')"
    )]
    #[serde(default)]
    pub pattern: Option<String>,
    #[schemars(description = "Pages to extract, e.g. '1-3,5' (default: all pages)")]
    #[serde(default)]
    pub pages: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfResolvePagesRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Page selection, e.g. '1-3,5' (default: all pages)")]
    #[serde(default)]
    pub pages: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Split a PDF into one file per selected page. Returns the written file paths in page order.")]
    async fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let options = SplitOptions {
            out_dir: req.output_dir.map(PathBuf::from),
            template: req.pattern,
            pages: req.pages,
        };
        let path = req.path;

        // Splitting is blocking file I/O; keep it off the protocol loop.
        let outcome =
            tokio::task::spawn_blocking(move || split(&path, &options, None, None)).await;

        let result = match outcome {
            Ok(Ok(written)) => SplitResult {
                written,
                error: None,
            },
            Ok(Err(failure)) => SplitResult {
                error: Some(failure.to_string()),
                written: failure.written,
            },
            Err(e) => return format!("Error: {}", e),
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Resolve a page selection like '1-3,5' against a PDF and list the 1-based pages it selects")]
    fn pdf_resolve_pages(&self, Parameters(req): Parameters<PdfResolvePagesRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let page_count = doc.page_count();

        match resolve(req.pages.as_deref(), page_count) {
            Ok(set) => {
                let result = ResolvePagesResult {
                    page_count,
                    pages: set.page_numbers(),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

/// `written` is filled even on failure: outputs before the error are kept.
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub written: Vec<PathBuf>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ResolvePagesResult {
    pub page_count: u32,
    pub pages: Vec<u32>,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF splitting tools. Use pdf_resolve_pages to check which pages a selection \
                 like '1-3,5' picks, then pdf_split to write one PDF per selected page."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
