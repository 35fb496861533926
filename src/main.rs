mod cli;
mod commands;
mod mcp;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use pdfburst::SplitOptions;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "pdfburst=debug",
        _ => "pdfburst=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries MCP frames and --json output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Split {
            path,
            output,
            pattern,
            pages,
            dry_run,
            json,
        } => {
            let options = SplitOptions {
                out_dir: output,
                template: pattern,
                pages,
            };
            commands::split::run(&path, &options, dry_run, json)?;
        }
        Commands::Pages { path, pages } => {
            commands::pages::run(&path, pages.as_deref())?;
        }
    }

    Ok(())
}
