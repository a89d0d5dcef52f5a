//! PDF merging.

pub mod merger;

pub use merger::{
    MergeOutcome, MergeStatistics, Merger, document_is_encrypted, looks_like_encryption_error,
    merge_buffers,
};
