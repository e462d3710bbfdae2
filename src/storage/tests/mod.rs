pub mod index;

use super::scan_partitions::{for_each_row, leaves_of};
use super::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// Writes `rows` as one data file at `dir/rel`, creating parent directories
pub fn write_rows(dir: &Path, rel: &str, rows: &[&str]) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, rows.join("\n")).unwrap();
}

/// `t1` partitioned by year/month: 2018/01, 2018/02, 2019/03
pub fn partitioned_db() -> TempDir {
    let dir = tempdir().unwrap();
    write_rows(dir.path(), "t1/year=2018/month=01/a.txt", &["1|x|ab", "2|y|ba"]);
    write_rows(dir.path(), "t1/year=2018/month=02/a.txt", &["3|z|aa"]);
    write_rows(dir.path(), "t1/year=2019/month=03/a.txt", &["4|w|abc"]);
    write_rows(dir.path(), "t1/year=2019/month=03/b.txt", &["5|v|b"]);
    dir
}

/// Builds a tree of `depth` levels named `k0=..`, `k1=..`, each node with `fanout`
/// children, and one single-row file per leaf
pub fn uniform_tree(root: &Path, depth: usize, fanout: usize) -> usize {
    fn build(dir: &Path, level: usize, depth: usize, fanout: usize, leaves: &mut usize) {
        if level == depth {
            write_rows(dir, "data.txt", &[&format!("{}|row", leaves)]);
            *leaves += 1;
            return;
        }
        for i in 0..fanout {
            build(&dir.join(format!("k{}=v{}", level, i)), level + 1, depth, fanout, leaves);
        }
    }

    let mut leaves = 0;
    build(root, 0, depth, fanout, &mut leaves);
    leaves
}
