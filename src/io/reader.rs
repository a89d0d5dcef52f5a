//! Concurrent input reading.
//!
//! Every input is read into memory up front, before the merge starts,
//! so the merge itself works purely on owned buffers. Reads run with
//! bounded concurrency and results come back in input order.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A fully buffered input file.
#[derive(Debug, Clone)]
pub struct FileBuffer {
    /// Display name of the input.
    pub name: String,

    /// Path the buffer was read from.
    pub path: PathBuf,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileBuffer {
    /// Construct a buffer from a path and its contents.
    pub fn new(path: PathBuf, bytes: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path, bytes }
    }

    /// Size of the buffered contents in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reads input files into memory with bounded concurrency.
#[derive(Debug, Clone)]
pub struct BufferReader {
    max_concurrent: usize,
}

impl BufferReader {
    /// Create a reader that keeps at most `max_concurrent` reads in flight.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Read a single file into a buffer.
    pub async fn read(&self, path: &Path) -> Result<FileBuffer> {
        let bytes = tokio::fs::read(path).await?;
        Ok(FileBuffer::new(path.to_path_buf(), bytes))
    }

    /// Read all files, preserving input order in the result.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<FileBuffer>> {
        let results: Vec<Result<FileBuffer>> = stream::iter(paths.iter().cloned())
            .map(|path| async move {
                let bytes = tokio::fs::read(&path).await?;
                Ok(FileBuffer::new(path, bytes))
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        results.into_iter().collect()
    }
}

impl Default for BufferReader {
    fn default() -> Self {
        Self::new(4)
    }
}
