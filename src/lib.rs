//! pdfmerge - Merge PDF files into a single document.
//!
//! This library implements an ordered merge session: up to twelve PDF
//! files enter a pending list, can be reordered or removed, and are then
//! merged into one document. It supports:
//!
//! - Batch intake with all-or-nothing screening
//! - Reordering and removal of pending files
//! - Encrypted-input detection with per-file reporting
//! - Merging on a blocking worker with all buffers loaded up front
//! - Atomic output writing
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerge::io::{ArtifactWriter, BufferReader};
//! use pdfmerge::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//!
//! let reader = BufferReader::default();
//! let buffers = reader.read_all(&paths).await?;
//!
//! let merger = Merger::new();
//! let outcome = merger.merge(buffers).await?;
//! println!("Created {} page document", outcome.artifact.page_count());
//!
//! let writer = ArtifactWriter::new();
//! writer.save(&outcome.artifact, &PathBuf::from("merged.pdf")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Managing the Pending List
//!
//! ```
//! use pdfmerge::queue::{MergeQueue, PendingFile};
//! use std::path::PathBuf;
//!
//! # fn example() -> pdfmerge::Result<()> {
//! let mut queue = MergeQueue::new();
//! queue.add_batch(vec![
//!     PendingFile::new(PathBuf::from("a.pdf")),
//!     PendingFile::new(PathBuf::from("b.pdf")),
//! ])?;
//!
//! queue.move_entry(1, 0)?;
//! assert!(queue.can_merge());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod io;
pub mod merge;
pub mod output;
pub mod queue;
pub mod utils;

// Re-export commonly used types
pub use artifact::{DEFAULT_OUTPUT_NAME, MergedPdf};
pub use config::Config;
pub use error::{PdfMergeError, Result};
pub use queue::{MAX_FILES, MergeQueue, PendingFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
