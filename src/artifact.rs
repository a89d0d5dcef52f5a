//! The merged artifact.
//!
//! A successful merge produces a [`MergedPdf`]: the serialized document
//! bytes plus the page count, held in memory until the caller decides
//! where to put it.

use crate::utils::format_file_size;

/// Default file name for the merged output.
pub const DEFAULT_OUTPUT_NAME: &str = "merged.pdf";

/// An in-memory merged PDF document.
#[derive(Debug, Clone)]
pub struct MergedPdf {
    bytes: Vec<u8>,
    page_count: usize,
}

impl MergedPdf {
    /// Wrap serialized document bytes.
    pub fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        Self { bytes, page_count }
    }

    /// The serialized document.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the artifact, yielding its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of pages in the merged document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Size of the serialized document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Human-readable size.
    pub fn format_size(&self) -> String {
        format_file_size(self.bytes.len() as u64)
    }
}
