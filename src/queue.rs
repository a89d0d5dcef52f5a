//! The ordered pending-file list at the heart of a merge session.
//!
//! [`MergeQueue`] holds the files waiting to be merged, in order. Order is
//! meaningful: it is both the display order and the merge order. The
//! queue supports batch appends, removal by position, and reorder moves;
//! a merge never clears it.
//!
//! Batch appends are atomic: if a batch would push the queue past
//! [`MAX_FILES`], nothing from the batch is added.

use std::path::{Path, PathBuf};

use crate::error::{PdfMergeError, Result};

/// Maximum number of files the pending list can hold.
pub const MAX_FILES: usize = 12;

/// A file waiting in the pending list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Path to the file on disk.
    pub path: PathBuf,

    /// Display name shown in listings and error reports.
    pub name: String,
}

impl PendingFile {
    /// Create a pending file from a path, deriving the display name
    /// from the final path component.
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

/// Ordered list of files pending merge.
#[derive(Debug, Clone, Default)]
pub struct MergeQueue {
    entries: Vec<PendingFile>,
}

impl MergeQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pending files, in merge order.
    pub fn entries(&self) -> &[PendingFile] {
        &self.entries
    }

    /// The pending file paths, in merge order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// The display names, in merge order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Whether a merge may be triggered.
    ///
    /// True iff the queue holds at least two files.
    pub fn can_merge(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Append a batch of files to the end of the queue.
    ///
    /// The append is atomic: if the batch would push the queue past
    /// [`MAX_FILES`], the queue is left unchanged and an error is
    /// returned naming the attempted total.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::TooManyFiles`] when the ceiling would be
    /// exceeded.
    pub fn add_batch(&mut self, batch: Vec<PendingFile>) -> Result<()> {
        let attempted = self.entries.len() + batch.len();
        if attempted > MAX_FILES {
            return Err(PdfMergeError::TooManyFiles {
                attempted,
                limit: MAX_FILES,
            });
        }

        self.entries.extend(batch);
        Ok(())
    }

    /// Remove the file at the given 0-indexed position.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::IndexOutOfRange`] when `index` is past
    /// the end of the list.
    pub fn remove(&mut self, index: usize) -> Result<PendingFile> {
        if index >= self.entries.len() {
            return Err(PdfMergeError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Move the file at `from` to position `to`.
    ///
    /// A splice move: the entry is removed from its source position and
    /// reinserted at the target, shifting the entries between them. A
    /// move onto itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::IndexOutOfRange`] when either position is
    /// past the end of the list.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(PdfMergeError::IndexOutOfRange { index, len });
            }
        }

        if from == to {
            return Ok(());
        }

        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
        Ok(())
    }

    /// Reorder the whole queue by a 1-indexed permutation.
    ///
    /// `order[i]` names the current position of the file that should end
    /// up at position `i`. The slice must be a permutation of
    /// `1..=len`.
    ///
    /// # Errors
    ///
    /// Returns an error when `order` is not a full permutation of the
    /// current positions; the queue is left unchanged.
    pub fn permute(&mut self, order: &[usize]) -> Result<()> {
        let len = self.entries.len();
        if order.len() != len {
            return Err(PdfMergeError::invalid_config(format!(
                "Order lists {} position(s) but there are {} file(s)",
                order.len(),
                len
            )));
        }

        let mut seen = vec![false; len];
        for &position in order {
            if position == 0 || position > len {
                return Err(PdfMergeError::invalid_config(format!(
                    "Order position {position} is out of range 1..={len}"
                )));
            }
            if seen[position - 1] {
                return Err(PdfMergeError::invalid_config(format!(
                    "Order repeats position {position}"
                )));
            }
            seen[position - 1] = true;
        }

        let reordered = order
            .iter()
            .map(|&position| self.entries[position - 1].clone())
            .collect();
        self.entries = reordered;
        Ok(())
    }

    /// Look up a pending file by path.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }
}
