//! Error types for pdfmerge.
//!
//! All fallible operations in this crate return [`Result`], built on the
//! single [`PdfMergeError`] enum. Errors are designed to be informative
//! and actionable, and each variant maps to a process exit code.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Input file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file does not carry the PDF magic header.
    #[error("Not a PDF file: {path}\n  Only PDF files can be merged")]
    NotAPdf {
        /// Path to the rejected file.
        path: PathBuf,
    },

    /// Adding a batch would push the pending list past the ceiling.
    #[error(
        "Too many files: adding this batch would hold {attempted} files \
         (the limit is {limit}). The batch was not added"
    )]
    TooManyFiles {
        /// Total the pending list would have reached.
        attempted: usize,
        /// Maximum number of pending files.
        limit: usize,
    },

    /// A queue operation referenced a position outside the pending list.
    #[error("Position {index} is out of range for a list of {len} file(s)")]
    IndexOutOfRange {
        /// Offending 0-indexed position.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// Merging requires at least two pending files.
    #[error("Cannot merge {count} file(s): at least 2 are required")]
    TooFewFiles {
        /// Number of pending files.
        count: usize,
    },

    /// One or more inputs are encrypted; nothing was merged.
    #[error(
        "Refusing to merge: {} encrypted input(s): {}",
        .names.len(),
        .names.join(", ")
    )]
    EncryptedInputs {
        /// Display names of exactly the encrypted inputs.
        names: Vec<String>,
    },

    /// Failed to load an input as a PDF document.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the input.
        name: String,
        /// Reason reported by the document library.
        reason: String,
    },

    /// Merge operation failed for a structural reason.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {path}\n  \
         Use --force to overwrite or choose a different output path"
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output file.
    #[error("Failed to create output file: {path}\n  Reason: {source}")]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {path}\n  Reason: {source}")]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfMergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<anyhow::Error> for PdfMergeError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfMergeError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: PathBuf) -> Self {
        Self::NotAPdf { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::NotAPdf { .. } => 2,
            Self::TooManyFiles { .. } => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::TooFewFiles { .. } => 1,
            Self::EncryptedInputs { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::MergeFailed { .. } => 6,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
