//! Output formatting and display.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Error and warning display
//! - Intake summaries
//! - Quiet and verbose modes

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;
use crate::intake::IntakeSummary;
use crate::utils::format_file_size;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display an intake summary to the user.
pub fn display_intake_summary(formatter: &OutputFormatter, summary: &IntakeSummary) {
    let encrypted = summary.encrypted_names();
    if !encrypted.is_empty() {
        formatter.warning(&format!(
            "Warning: {} encrypted file(s) in the list",
            encrypted.len()
        ));
    }

    formatter.info(&format!(
        "{} file(s): {} pages, {}",
        summary.reports.len(),
        summary.total_pages,
        format_file_size(summary.total_size)
    ));
}
