//! Read-only storage over a Hive-style partitioned directory tree

use std::io;
use std::path::PathBuf;

mod index;
mod partition;
mod scan_partitions;
mod table;

#[cfg(test)]
mod tests;

pub use index::PartitionIndex;
pub use partition::{PartitionRef, load_partitions};
pub use scan_partitions::{
    ScanReport, collect_column, field, for_each_dir_row, for_each_leaf_row,
};
pub use table::{Database, Table};

/// Common error type for storage operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Database directory not found: {0}")]
    DatabaseNotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Partition key not found: {0}")]
    PartitionKeyNotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Field delimiter used by every data file
pub const FIELD_DELIMITER: char = '|';
