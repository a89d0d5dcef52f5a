//! Input reading and artifact writing.

pub mod reader;
pub mod writer;

pub use reader::{BufferReader, FileBuffer};
pub use writer::{ArtifactWriter, WriteOptions, WriteStatistics};
