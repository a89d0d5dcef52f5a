//! Core PDF merging implementation.
//!
//! The merge works entirely on in-memory buffers: every input is parsed,
//! probed for encryption, then concatenated into a single document. The
//! synchronous [`merge_buffers`] does the actual work; [`Merger`] runs it
//! on a blocking worker so async callers stay responsive.

use lopdf::{Document, Object, ObjectId};
use std::time::{Duration, Instant};
use tokio::task;

use crate::artifact::MergedPdf;
use crate::error::{PdfMergeError, Result};
use crate::io::FileBuffer;
use crate::utils::format_file_size;

/// Heuristic for lopdf error text that indicates an encrypted document.
///
/// Matches "crypt" (encrypt, decrypt, decryption) and "password", case
/// insensitively.
pub fn looks_like_encryption_error(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("crypt") || lowered.contains("password")
}

/// Whether a parsed document carries an encryption dictionary.
pub fn document_is_encrypted(doc: &Document) -> bool {
    doc.trailer.get(b"Encrypt").is_ok()
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge.
    pub merge_time: Duration,

    /// Total size of input buffers in bytes.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
pub struct MergeOutcome {
    /// The merged document, serialized and ready to save.
    pub artifact: MergedPdf,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Merge buffered inputs into a single document.
///
/// Inputs are concatenated in slice order. Before any merging happens,
/// every buffer is parsed and probed: if any input is encrypted, the
/// merge is refused with an error naming exactly the encrypted inputs,
/// and no output is produced.
///
/// # Errors
///
/// - [`PdfMergeError::TooFewFiles`] when fewer than two buffers are given.
/// - [`PdfMergeError::EncryptedInputs`] when any input is encrypted.
/// - [`PdfMergeError::FailedToLoadPdf`] when an input cannot be parsed.
/// - [`PdfMergeError::MergeFailed`] when the page trees cannot be combined.
pub fn merge_buffers(buffers: &[FileBuffer]) -> Result<MergeOutcome> {
    if buffers.len() < 2 {
        return Err(PdfMergeError::TooFewFiles {
            count: buffers.len(),
        });
    }

    let merge_start = Instant::now();

    // Probe every input before touching any of them. Encryption is
    // reported for the complete batch, not just the first offender.
    let mut documents = Vec::with_capacity(buffers.len());
    let mut encrypted_names = Vec::new();
    let mut first_load_failure: Option<PdfMergeError> = None;

    for buffer in buffers {
        match Document::load_mem(&buffer.bytes) {
            Ok(doc) => {
                if document_is_encrypted(&doc) {
                    encrypted_names.push(buffer.name.clone());
                } else {
                    documents.push(doc);
                }
            }
            Err(err) => {
                let text = err.to_string();
                if looks_like_encryption_error(&text) {
                    encrypted_names.push(buffer.name.clone());
                } else if first_load_failure.is_none() {
                    first_load_failure =
                        Some(PdfMergeError::failed_to_load_pdf(buffer.name.clone(), text));
                }
            }
        }
    }

    if !encrypted_names.is_empty() {
        return Err(PdfMergeError::EncryptedInputs {
            names: encrypted_names,
        });
    }

    if let Some(failure) = first_load_failure {
        return Err(failure);
    }

    let mut merged = merge_documents(documents)?;
    let total_pages = merged.get_pages().len();

    let mut bytes = Vec::new();
    merged
        .save_to(&mut bytes)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to serialize output: {e}")))?;

    let statistics = MergeStatistics {
        files_merged: buffers.len(),
        total_pages,
        merge_time: merge_start.elapsed(),
        input_size: buffers.iter().map(|b| b.len() as u64).sum(),
    };

    Ok(MergeOutcome {
        artifact: MergedPdf::new(bytes, total_pages),
        statistics,
    })
}

/// Concatenate parsed documents in order.
fn merge_documents(documents: Vec<Document>) -> Result<Document> {
    let mut documents = documents.into_iter();
    let mut merged = documents
        .next()
        .ok_or_else(|| PdfMergeError::TooFewFiles { count: 0 })?;
    let mut max_id = merged.max_id;

    for mut doc in documents {
        // Renumber objects to avoid ID conflicts.
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let doc_pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        merged.objects.extend(doc.objects);

        add_pages_to_tree(&mut merged, &doc_pages)?;
    }

    merged.compress();
    merged.renumber_objects();

    Ok(merged)
}

/// Add pages to the merged document's page tree.
fn add_pages_to_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let catalog = merged
        .catalog_mut()
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get catalog: {e}")))?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages reference: {e}")))?;

    let pages_dict = merged
        .get_object_mut(pages_id)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_dict {
        let kids = dict
            .get_mut(b"Kids")
            .map_err(|_| PdfMergeError::merge_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            for &page_id in page_ids {
                kids_array.push(Object::Reference(page_id));
            }
        } else {
            return Err(PdfMergeError::merge_failed("Kids is not an array"));
        }

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        let new_count = current_count + page_ids.len() as i64;
        dict.set("Count", Object::Integer(new_count));
    } else {
        return Err(PdfMergeError::merge_failed(
            "Pages object is not a dictionary",
        ));
    }

    Ok(())
}

/// Runs merges on a blocking worker.
///
/// Each call spawns one short-lived worker task with all input buffers
/// moved in up front. There is no cancellation: once started, a merge
/// runs to completion or error.
#[derive(Debug, Clone, Default)]
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge buffered inputs on a blocking worker.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`merge_buffers`], plus an error if the
    /// worker task panics.
    pub async fn merge(&self, buffers: Vec<FileBuffer>) -> Result<MergeOutcome> {
        task::spawn_blocking(move || merge_buffers(&buffers))
            .await
            .map_err(|e| PdfMergeError::other(format!("Merge task failed: {e}")))?
    }
}
