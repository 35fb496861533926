use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfburst")]
#[command(about = "Split PDFs into one file per page, with MCP server support")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Split a PDF into single-page files
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Output directory (defaults to the PDF's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name pattern using {base}, {num} and {page}
        /// (defaults to "{base}_{num:03d}" plus the source extension)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Pages to extract (e.g., "1-3,5"); all pages when omitted
        #[arg(short = 'P', long)]
        pages: Option<String>,

        /// Print the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Print written paths as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which pages a selection expression picks
    Pages {
        /// PDF file to inspect
        path: PathBuf,

        /// Page selection (e.g., "1-3,5"); all pages when omitted
        pages: Option<String>,
    },
}
