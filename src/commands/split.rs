use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pdfburst::{plan, split, ProgressEvent, SplitOptions};
use std::path::Path;

const PB_STYLE: &str = "{prefix:>10.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len}";

pub fn run<P: AsRef<Path>>(input: P, options: &SplitOptions, dry_run: bool, json: bool) -> Result<()> {
    let input = input.as_ref();

    if dry_run {
        let planned = plan(input, options)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&planned)?);
        } else {
            for out in &planned {
                println!("page {} -> {}", out.page, out.path.display());
            }
            println!("{} file(s) would be written", planned.len());
        }
        return Ok(());
    }

    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(PB_STYLE) {
        pb.set_style(style);
    }
    pb.set_prefix("Splitting");
    let mut on_progress = |e: ProgressEvent| {
        pb.set_length(e.total as u64);
        pb.set_position(e.completed as u64);
    };

    let result = split(input, options, Some(&mut on_progress), None);
    pb.finish_and_clear();

    let written = match result {
        Ok(written) => written,
        Err(failure) => {
            for path in &failure.written {
                eprintln!("kept partial output {}", path.display());
            }
            return Err(failure).with_context(|| format!("Failed to split {}", input.display()));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&written)?);
    } else if written.is_empty() {
        println!("No pages selected; nothing written.");
    } else {
        println!("Split {} page(s) from {}", written.len(), input.display());
        for path in &written {
            println!("  {}", path.display());
        }
    }

    Ok(())
}
