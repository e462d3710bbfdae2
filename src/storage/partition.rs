use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One `key=value` directory level of a table.
///
/// Only leaves (nodes without children) hold data files.
#[derive(Debug)]
pub struct PartitionNode {
    name: String,
    value: String,
    dir: PathBuf,
    children: Vec<PartitionRef>,
}

pub type PartitionRef = Arc<PartitionNode>;

impl PartitionNode {
    /// Builds a node from a directory named `key=value`.
    ///
    /// Returns `None` when the directory name is not a partition name. The value keeps
    /// everything after the first `=`.
    pub fn new(dir: PathBuf, children: Vec<PartitionRef>) -> Option<Self> {
        let (name, value) = {
            let base = dir.file_name()?.to_str()?;
            let (name, value) = base.split_once('=')?;
            (name.to_string(), value.to_string())
        };

        Some(Self { name, value, dir, children })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn children(&self) -> &[PartitionRef] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for PartitionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}={}, sub-partitions: {}}}",
            self.name,
            self.value,
            self.children.len()
        )
    }
}

/// Recursively loads the partition directories below `dir`.
///
/// A missing directory, or one without subdirectories, yields an empty forest: the
/// table (or branch) is unpartitioned or terminal. Regular files are left to the
/// leaf that owns them.
pub fn load_partitions(dir: &Path) -> Vec<PartitionRef> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let entries = match sorted_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Failed to list partition directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut partitions = Vec::with_capacity(entries.len());
    for path in entries.into_iter().filter(|p| p.is_dir()) {
        let children = load_partitions(&path);
        match PartitionNode::new(path.clone(), children) {
            Some(node) => partitions.push(Arc::new(node)),
            None => log::warn!("Skipping non-partition directory {}", path.display()),
        }
    }

    partitions
}

/// Regular files directly under `dir`, in name order
pub(crate) fn data_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}

pub(crate) fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}
