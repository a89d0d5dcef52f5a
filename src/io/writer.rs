//! Saving the merged artifact to disk.
//!
//! This module provides safe artifact writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite protection helpers
//! - Write statistics

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::artifact::MergedPdf;
use crate::error::{PdfMergeError, Result};
use crate::utils::format_file_size;

/// Options for writing the merged artifact.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Artifact writer with configurable behavior.
pub struct ArtifactWriter {
    options: WriteOptions,
}

impl ArtifactWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes (faster but less safe).
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Save a merged artifact to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory doesn't exist, the
    /// process lacks permissions, or the write fails partway.
    pub async fn save(&self, artifact: &MergedPdf, path: &Path) -> Result<()> {
        let _stats = self.save_with_stats(artifact, path).await?;
        Ok(())
    }

    /// Save a merged artifact and return statistics about the operation.
    pub async fn save_with_stats(
        &self,
        artifact: &MergedPdf,
        path: &Path,
    ) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let bytes = artifact.bytes().to_vec();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            let write_path = if options.atomic {
                path_buf.with_extension("tmp")
            } else {
                path_buf.clone()
            };

            let write_result = (|| {
                let file = std::fs::File::create(&write_path).map_err(|e| {
                    PdfMergeError::FailedToCreateOutput {
                        path: write_path.clone(),
                        source: e,
                    }
                })?;

                let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

                writer
                    .write_all(&bytes)
                    .and_then(|_| writer.flush())
                    .map_err(|e| PdfMergeError::FailedToWrite {
                        path: write_path.clone(),
                        source: e,
                    })?;

                if options.atomic {
                    std::fs::rename(&write_path, &path_buf).map_err(|e| {
                        PdfMergeError::FailedToWrite {
                            path: path_buf.clone(),
                            source: e,
                        }
                    })?;
                }

                Ok::<_, PdfMergeError>(())
            })();

            if let Err(err) = write_result {
                // Don't leave a stale temp file behind.
                if options.atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(err);
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfMergeError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfMergeError::other(format!("Write task failed: {e}")))??;

        Ok(stats)
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory doesn't exist or is not
    /// writable.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(PdfMergeError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await?;

            if metadata.permissions().readonly() {
                return Err(PdfMergeError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if the output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Safely remove an output file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn remove_if_exists(&self, path: &Path) -> Result<()> {
        if self.exists(path).await {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| PdfMergeError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}
