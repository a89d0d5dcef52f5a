//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Merging {} inputs", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::artifact::DEFAULT_OUTPUT_NAME;
use crate::config::{Config, OrderSpec, OverwriteMode};
use crate::error::{PdfMergeError, Result};
use crate::intake::expand_patterns;

/// Merge PDF files into a single document.
///
/// pdfmerge combines up to twelve PDF files into one document, in the
/// order given. Inputs can be reordered or dropped before merging, and
/// encrypted inputs are detected and refused by name.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns.
    /// Files are merged in the order provided; use --order to rearrange.
    ///
    /// Examples:
    ///   pdfmerge file1.pdf file2.pdf
    ///   pdfmerge chapter*.pdf -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// The merged PDF will be written to this location.
    /// Use --force to overwrite existing files without confirmation.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Rearrange inputs before merging (comma-separated 1-indexed positions)
    ///
    /// Must be a full permutation of the input positions.
    ///
    /// Examples:
    ///   --order 2,1       # swap two inputs
    ///   --order 3,1,2     # third input first
    #[arg(long, value_name = "POSITIONS")]
    pub order: Option<String>,

    /// Drop an input from the list before merging (1-indexed, repeatable)
    ///
    /// Positions refer to the list after --order is applied.
    #[arg(long, value_name = "N")]
    pub skip: Vec<usize>,

    /// Dry run - screen inputs and preview the merge without creating output
    ///
    /// Checks that all inputs exist and are PDFs, then displays what the
    /// merge would do (file list, page counts, total size) without
    /// producing the output file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show detailed information about the merge
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfmerge will prompt before overwriting an existing file.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the intake report as JSON
    ///
    /// Stdout carries only the report; status messages are suppressed
    /// and warnings go to stderr. Combine with --dry-run to inspect
    /// inputs from scripts.
    #[arg(long, conflicts_with = "verbose")]
    pub json: bool,

    /// Number of parallel jobs for reading inputs
    ///
    /// Controls how many files are read concurrently.
    /// Default is number of CPU cores. Use 1 for sequential reads.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// This method performs the following:
    /// - Expands glob patterns into concrete paths
    /// - Parses the reorder permutation
    /// - Resolves overwrite mode
    /// - Validates the resulting configuration
    ///
    /// # Errors
    ///
    /// Returns an error if pattern expansion fails, the order string is
    /// malformed, or configuration validation fails.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = expand_patterns(&self.inputs)?;

        let order = match self.order {
            Some(ref order_str) => Some(
                OrderSpec::parse(order_str)
                    .map_err(|e| PdfMergeError::invalid_config(e.to_string()))?,
            ),
            None => None,
        };

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            order,
            skips: self.skip.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            json: self.json,
            jobs: self.jobs,
        };

        config.validate().map_err(|e| {
            PdfMergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O:
    /// - Check for empty required fields
    /// - Validate numeric ranges
    /// - Validate the order string format
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        // Shouldn't happen with clap, but be safe
        if self.inputs.is_empty() {
            return Err(PdfMergeError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfMergeError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if let Some(ref order) = self.order {
            OrderSpec::parse(order).map_err(|e| PdfMergeError::invalid_config(e.to_string()))?;
        }

        let mut seen_skips = Vec::new();
        for &position in &self.skip {
            if position == 0 {
                return Err(PdfMergeError::invalid_config(
                    "Skip positions are 1-indexed",
                ));
            }
            if seen_skips.contains(&position) {
                return Err(PdfMergeError::invalid_config(format!(
                    "Duplicate skip position: {position}"
                )));
            }
            seen_skips.push(position);
        }

        Ok(())
    }
}
