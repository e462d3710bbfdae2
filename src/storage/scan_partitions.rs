use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::partition::data_files_in;
use super::{FIELD_DELIMITER, PartitionRef};

/// A file (or directory listing) skipped during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What a scan touched, and what it had to skip.
///
/// Scans are best effort: an unreadable file is recorded here and the remaining
/// files still contribute to the count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub rows_scanned: usize,
    /// Rows with fewer fields than a requested column ordinal
    pub short_rows: usize,
    pub unreadable: Vec<UnreadableFile>,
}

impl ScanReport {
    pub fn record_unreadable(&mut self, path: &Path, err: &io::Error) {
        log::warn!("Skipping unreadable file {}: {}", path.display(), err);
        self.unreadable.push(UnreadableFile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.unreadable.is_empty()
    }
}

/// Field `ordinal` of a split row, if the row is long enough
pub fn field<'a>(fields: &[&'a str], ordinal: usize) -> Option<&'a str> {
    fields.get(ordinal).copied()
}

/// Streams one data file, calling `f` with the `|`-separated fields of every line.
///
/// Lines are decoded lossily, so invalid UTF-8 only affects the bytes it covers.
/// `f` returns `None` when the row lacks a field it needs; such rows are tallied in
/// `report.short_rows`. A file that fails to open or read is recorded and skipped.
pub fn for_each_row<F>(path: &Path, report: &mut ScanReport, mut f: F)
where
    F: FnMut(&[&str]) -> Option<()>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            report.record_unreadable(path, &e);
            return;
        }
    };
    report.files_scanned += 1;

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                report.record_unreadable(path, &e);
                return;
            }
        }

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        report.rows_scanned += 1;
        if f(&fields).is_none() {
            report.short_rows += 1;
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scans every data file directly under `dir`
pub fn for_each_dir_row<F>(dir: &Path, report: &mut ScanReport, mut f: F)
where
    F: FnMut(&[&str]) -> Option<()>,
{
    let files = match data_files_in(dir) {
        Ok(files) => files,
        Err(e) => {
            report.record_unreadable(dir, &e);
            return;
        }
    };

    for file in &files {
        for_each_row(file, report, &mut f);
    }
}

/// Leaves below (and including) `start`, breadth first
pub fn leaves_of(start: &[PartitionRef]) -> Vec<PartitionRef> {
    let mut leaves = Vec::new();
    let mut queue: VecDeque<PartitionRef> = start.iter().map(Arc::clone).collect();

    while let Some(node) = queue.pop_front() {
        if node.is_leaf() {
            leaves.push(node);
        } else {
            queue.extend(node.children().iter().map(Arc::clone));
        }
    }

    leaves
}

/// Scans every row under every leaf reachable from `start`
pub fn for_each_leaf_row<F>(start: &[PartitionRef], report: &mut ScanReport, mut f: F)
where
    F: FnMut(&[&str]) -> Option<()>,
{
    for leaf in leaves_of(start) {
        for_each_dir_row(leaf.dir(), report, &mut f);
    }
}

/// Collects column `ordinal` from every row in the subtree rooted at `node`
pub fn collect_column(node: &PartitionRef, ordinal: usize, report: &mut ScanReport) -> Vec<String> {
    let mut values = Vec::new();
    for_each_leaf_row(std::slice::from_ref(node), report, |fields| {
        values.push(field(fields, ordinal)?.to_string());
        Some(())
    });
    values
}
