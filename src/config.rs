//! Configuration module for pdfmerge.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives the merge session. It handles:
//! - Validation of argument combinations
//! - Reorder permutation parsing
//! - Application of defaults

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::queue::MAX_FILES;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Reorder specification for the pending list.
///
/// A full 1-indexed permutation of the input positions:
/// - "2,1" - swap two inputs
/// - "3,1,2" - third input first, then the original first and second
///
/// Every position from 1 to the input count must appear exactly once;
/// this is checked against the actual list length when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    positions: Vec<usize>,
}

impl OrderSpec {
    /// Parse an order string.
    ///
    /// # Arguments
    ///
    /// * `s` - Comma-separated 1-indexed positions (e.g., "3,1,2")
    ///
    /// # Errors
    ///
    /// Returns an error if the string contains non-numeric entries, zero,
    /// or duplicate positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfmerge::config::OrderSpec;
    ///
    /// let order = OrderSpec::parse("3,1,2").unwrap();
    /// assert_eq!(order.positions(), &[3, 1, 2]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut positions = Vec::new();

        for part in s.split(',') {
            let part = part.trim();

            let position: usize = part
                .parse()
                .with_context(|| format!("Invalid position: {part}"))?;

            if position == 0 {
                bail!("Positions must be positive (1-indexed)");
            }

            if positions.contains(&position) {
                bail!("Duplicate position: {position}");
            }

            positions.push(position);
        }

        if positions.is_empty() {
            bail!("Order cannot be empty");
        }

        Ok(Self { positions })
    }

    /// The parsed 1-indexed positions, in their new order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// Complete configuration for a merge session.
///
/// This structure contains all settings needed to run a session,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in pending-list order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Reorder permutation to apply before merging.
    pub order: Option<OrderSpec>,

    /// 1-indexed positions to remove after reordering.
    pub skips: Vec<usize>,

    /// Dry run mode - validate and show the plan without merging.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Emit the validation report as JSON.
    pub json: bool,

    /// Number of parallel buffer reads (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - More inputs are given than the pending-list ceiling allows
    /// - Verbose mode is combined with quiet or JSON output
    /// - A skip position is zero or repeated
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.inputs.len() > MAX_FILES {
            bail!(
                "Too many input files: {} (the limit is {MAX_FILES})",
                self.inputs.len()
            );
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.verbose && self.json {
            bail!("Cannot use both --verbose and --json");
        }

        let mut seen_skips = Vec::new();
        for &position in &self.skips {
            if position == 0 {
                bail!("Skip positions are 1-indexed");
            }
            if seen_skips.contains(&position) {
                bail!("Duplicate skip position: {position}");
            }
            seen_skips.push(position);
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel buffer reads.
    ///
    /// Returns the configured job count, or the number of CPU cores.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
