//! File-based snapshot and staging output

pub mod snapshot;
pub mod staging;

pub use snapshot::SnapshotWriter;
pub use staging::{StagingRow, StagingWriter};
