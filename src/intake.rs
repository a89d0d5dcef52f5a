//! File intake: pattern expansion and batch screening.
//!
//! Candidate files enter the session as a batch. The whole batch is
//! screened before anything reaches the pending list: every file must
//! exist, be a regular file, and start with the PDF magic header. Any
//! violation aborts the entire batch, so a failed add leaves the session
//! exactly as it was.
//!
//! The module also produces per-file inspection reports (page count,
//! size, encryption flag) used for plan display and the JSON report.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::task;

use crate::error::{PdfMergeError, Result};
use crate::merge::{document_is_encrypted, looks_like_encryption_error};
use crate::queue::PendingFile;

/// Leading bytes every PDF file carries.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Expand glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`. Patterns
/// that match nothing are kept as literal paths so that screening can
/// report the missing file by name.
///
/// # Errors
///
/// Propagates glob parse errors and filesystem errors from the glob
/// iterator.
pub fn expand_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = glob::glob(pattern).map_err(|err| PdfMergeError::Other {
            message: err.to_string(),
        })?;

        let mut matched = false;
        for entry in paths {
            let path = entry.map_err(|err| PdfMergeError::Other {
                message: err.to_string(),
            })?;
            resolved.push(path);
            matched = true;
        }

        if !matched {
            resolved.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved)
}

/// Inspection report for a single screened file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReport {
    /// Path to the inspected file.
    pub path: PathBuf,

    /// Display name.
    pub name: String,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of pages, when the document could be opened.
    pub page_count: Option<usize>,

    /// Whether the document appears to be encrypted.
    pub is_encrypted: bool,
}

/// Aggregate inspection results for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSummary {
    /// Individual reports, in pending-list order.
    pub reports: Vec<IntakeReport>,

    /// Total pages across all openable files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,
}

impl IntakeSummary {
    fn from_reports(reports: Vec<IntakeReport>) -> Self {
        let total_pages = reports.iter().filter_map(|r| r.page_count).sum();
        let total_size = reports.iter().map(|r| r.file_size).sum();
        Self {
            reports,
            total_pages,
            total_size,
        }
    }

    /// Display names of the files flagged as encrypted.
    pub fn encrypted_names(&self) -> Vec<String> {
        self.reports
            .iter()
            .filter(|r| r.is_encrypted)
            .map(|r| r.name.clone())
            .collect()
    }
}

/// Screens candidate batches before they reach the pending list.
#[derive(Debug, Clone, Default)]
pub struct Intake;

impl Intake {
    /// Create a new intake screen.
    pub fn new() -> Self {
        Self
    }

    /// Screen a candidate batch.
    ///
    /// Checks every path for existence, file-ness, and the PDF magic
    /// header. The batch is all-or-nothing: the first violation aborts
    /// with an error naming the offending file, and nothing is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::FileNotFound`], [`PdfMergeError::NotAFile`],
    /// or [`PdfMergeError::NotAPdf`] for the first offending path.
    pub async fn screen_batch(&self, paths: &[PathBuf]) -> Result<Vec<PendingFile>> {
        let mut screened = Vec::with_capacity(paths.len());

        for path in paths {
            self.screen_file(path).await?;
            screened.push(PendingFile::new(path.clone()));
        }

        Ok(screened)
    }

    /// Screen a single file without admitting it anywhere.
    pub async fn screen_file(&self, path: &Path) -> Result<()> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(_) => return Err(PdfMergeError::file_not_found(path.to_path_buf())),
        };

        if !metadata.is_file() {
            return Err(PdfMergeError::not_a_file(path.to_path_buf()));
        }

        // Sniff the header instead of trusting the extension.
        let mut file = tokio::fs::File::open(path).await?;
        let mut header = [0u8; PDF_MAGIC.len()];
        match file.read_exact(&mut header).await {
            Ok(_) => {
                if &header[..] != PDF_MAGIC {
                    return Err(PdfMergeError::not_a_pdf(path.to_path_buf()));
                }
            }
            // A file shorter than the magic header is not a PDF.
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(PdfMergeError::not_a_pdf(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        }

        Ok(())
    }

    /// Inspect screened files for plan display.
    ///
    /// Opens each document to count pages and detect encryption. Unlike
    /// screening, inspection is tolerant: a file that fails to open is
    /// reported with no page count (and flagged encrypted when the
    /// library error text says so) rather than aborting.
    pub async fn inspect_all(&self, paths: &[PathBuf]) -> Result<IntakeSummary> {
        let mut reports = Vec::with_capacity(paths.len());

        for path in paths {
            reports.push(self.inspect(path).await?);
        }

        Ok(IntakeSummary::from_reports(reports))
    }

    /// Inspect a single file.
    ///
    /// Document parsing runs on a blocking worker so the executor
    /// threads stay responsive.
    pub async fn inspect(&self, path: &Path) -> Result<IntakeReport> {
        let pending = PendingFile::new(path.to_path_buf());
        let file_size = tokio::fs::metadata(path).await.map(|m| m.len()).unwrap_or(0);

        let probe_path = path.to_path_buf();
        let (page_count, is_encrypted) =
            task::spawn_blocking(move || match Document::load(&probe_path) {
                Ok(doc) => {
                    let encrypted = document_is_encrypted(&doc);
                    (Some(doc.get_pages().len()), encrypted)
                }
                Err(err) => (None, looks_like_encryption_error(&err.to_string())),
            })
            .await
            .map_err(|e| PdfMergeError::other(format!("Inspect task failed: {e}")))?;

        Ok(IntakeReport {
            path: path.to_path_buf(),
            name: pending.name,
            file_size,
            page_count,
            is_encrypted,
        })
    }
}
