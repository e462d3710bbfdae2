use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::partition::sorted_entries;
use super::{Error, PartitionIndex, PartitionRef, load_partitions};

/// A named dataset: the partition forest under its directory plus the depth index.
///
/// An empty forest means the table is unpartitioned and its data files sit directly
/// in `base_dir`.
#[derive(Debug)]
pub struct Table {
    name: String,
    base_dir: PathBuf,
    partitions: Vec<PartitionRef>,
    index: PartitionIndex,
}

impl Table {
    pub fn load(base_dir: &Path) -> Self {
        let name = base_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let partitions = load_partitions(base_dir);
        let index = PartitionIndex::new(&partitions);

        Self {
            name,
            base_dir: base_dir.to_path_buf(),
            partitions,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn partition_roots(&self) -> &[PartitionRef] {
        &self.partitions
    }

    pub fn index(&self) -> &PartitionIndex {
        &self.index
    }

    /// Number of partition levels; zero for an unpartitioned table
    pub fn depth_count(&self) -> usize {
        self.index.depth_count()
    }

    pub fn is_partitioned(&self) -> bool {
        !self.partitions.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table Name: {}", self.name)?;
        writeln!(f, "Level of Partitions: {}", self.depth_count())?;
        if self.depth_count() > 0 {
            writeln!(f, "Partition Keys: {}", self.index.key_names().join("/"))?;
        }
        writeln!(f, "Number of Partitions: {}", self.partitions.len())?;
        for partition in &self.partitions {
            writeln!(f, "  {partition}")?;
        }
        Ok(())
    }
}

/// Every table found under one root directory. Built once, never mutated.
#[derive(Debug)]
pub struct Database {
    tables: BTreeMap<String, Table>,
}

impl Database {
    /// Loads each subdirectory of `root` as a table.
    ///
    /// Fails outright when `root` is missing or not a directory.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(Error::DatabaseNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut tables = BTreeMap::new();
        for path in sorted_entries(root)?.into_iter().filter(|p| p.is_dir()) {
            let table = Table::load(&path);
            log::debug!(
                "Loaded table {} with {} partition level(s)",
                table.name(),
                table.depth_count()
            );
            tables.insert(table.name().to_string(), table);
        }

        Ok(Self { tables })
    }

    pub fn table(&self, name: &str) -> Result<&Table, Error> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in self.tables() {
            writeln!(f, "{}", "=".repeat(68))?;
            write!(f, "{table}")?;
        }
        if !self.tables.is_empty() {
            writeln!(f, "{}", "=".repeat(68))?;
        }
        Ok(())
    }
}
