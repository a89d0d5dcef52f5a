//! pdfmerge - Merge PDF files into a single document.
//!
//! CLI entry point for the merge session: screen inputs, arrange the
//! pending list, merge on a worker, and save the result.

use clap::Parser;
use std::process;

use pdfmerge::cli::Cli;
use pdfmerge::config::Config;
use pdfmerge::error::PdfMergeError;
use pdfmerge::intake::Intake;
use pdfmerge::io::{ArtifactWriter, BufferReader};
use pdfmerge::merge::Merger;
use pdfmerge::output::{OutputFormatter, display_intake_summary};
use pdfmerge::queue::MergeQueue;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMergeError> {
    cli.validate()?;

    let config = cli.to_config()?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
        formatter.blank_line();
    }

    // Screen the batch before anything enters the pending list.
    formatter.debug("Screening input files...");
    let intake = Intake::new();
    let screened = intake.screen_batch(&config.inputs).await?;

    let mut queue = MergeQueue::new();
    queue.add_batch(screened)?;

    // Arrange the pending list.
    if let Some(ref order) = config.order {
        queue.permute(order.positions())?;
    }

    let mut skips = config.skips.clone();
    skips.sort_unstable();
    for position in skips.into_iter().rev() {
        let removed = queue.remove(position - 1)?;
        formatter.debug(&format!("Skipping {}", removed.name));
    }

    let paths = queue.paths();
    let summary = intake.inspect_all(&paths).await?;

    if config.json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| PdfMergeError::other(format!("Failed to render report: {e}")))?;
        println!("{rendered}");

        if config.dry_run {
            return Ok(());
        }
    } else if formatter.should_print() {
        display_intake_summary(&formatter, &summary);
        formatter.blank_line();
    }

    if config.dry_run {
        for (index, report) in summary.reports.iter().enumerate() {
            let pages = match report.page_count {
                Some(count) => format!("{count} page(s)"),
                None => "unreadable".to_string(),
            };
            formatter.list_item(index + 1, &format!("{} ({pages})", report.name));
        }
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    if !queue.can_merge() {
        return Err(PdfMergeError::TooFewFiles { count: queue.len() });
    }

    handle_output_overwrite(&config, &formatter).await?;

    // Buffer every input up front, then hand the batch to the worker.
    formatter.info("Reading input files...");
    let reader = BufferReader::new(config.effective_jobs());
    let buffers = reader.read_all(&paths).await?;

    formatter.info("Merging documents...");
    let merger = Merger::new();
    let outcome = match merger.merge(buffers).await {
        Ok(outcome) => outcome,
        Err(PdfMergeError::EncryptedInputs { names }) => {
            formatter.warning("Cannot merge encrypted files:");
            for (index, name) in names.iter().enumerate() {
                formatter.list_item(index + 1, name);
            }
            return Err(PdfMergeError::EncryptedInputs { names });
        }
        Err(err) => return Err(err),
    };

    if formatter.should_print() {
        formatter.blank_line();
        formatter.info(&format!(
            "Merged {} file(s) into {} pages in {:.2}s",
            outcome.statistics.files_merged,
            outcome.statistics.total_pages,
            outcome.statistics.merge_time.as_secs_f64()
        ));
    }

    formatter.info(&format!("Writing to: {}", config.output.display()));

    let writer = ArtifactWriter::new();
    let write_stats = writer
        .save_with_stats(&outcome.artifact, &config.output)
        .await?;

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Successfully created {} ({})",
            config.output.display(),
            write_stats.format_file_size()
        ));

        if formatter.is_verbose() {
            formatter.blank_line();
            formatter.section("Statistics");
            formatter.detail("Input files", &outcome.statistics.files_merged.to_string());
            formatter.detail("Total pages", &outcome.statistics.total_pages.to_string());
            formatter.detail("Input size", &outcome.statistics.format_input_size());
            formatter.detail("Output size", &write_stats.format_file_size());
            formatter.detail(
                "Merge time",
                &format!("{:.2}s", outcome.statistics.merge_time.as_secs_f64()),
            );
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
        }
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfMergeError> {
    use pdfmerge::config::OverwriteMode;

    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfMergeError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber.
            if formatter.is_quiet() {
                return Err(PdfMergeError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfMergeError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfMergeError::Cancelled)
            }
        }
    }
}
