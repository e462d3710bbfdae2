use std::fs;
use std::path::Path;

use tempfile::{TempDir, tempdir};

pub mod pattern;

use crate::query::parser::MAX_PATTERNS;
use crate::query::pattern::{LikePattern, like_to_regex};
use crate::query::predicate::{CompareOp, LikeMode};
use crate::query::*;
use crate::storage::Database;

pub fn write_rows(dir: &Path, rel: &str, rows: &[&str]) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, rows.join("\n")).unwrap();
}

/// `t0` unpartitioned; `t1` partitioned by year/month with three columns
pub fn create_test_db() -> (TempDir, Database) {
    let dir = tempdir().unwrap();

    write_rows(dir.path(), "t0/part-0.txt", &["abc|2018-01-01"]);
    write_rows(dir.path(), "t0/part-1.txt", &["xyz|2019-05-05"]);

    write_rows(dir.path(), "t1/year=2017/month=12/a.txt", &["01|2017-12-01|ab", "02|2017-12-02|ba"]);
    write_rows(dir.path(), "t1/year=2018/month=01/a.txt", &["03|2018-01-03|cab", "04|2018-01-04|aa"]);
    write_rows(dir.path(), "t1/year=2018/month=02/a.txt", &["05|2018-02-05|bab"]);
    write_rows(dir.path(), "t1/year=2018/month=02/b.txt", &["06|2018-02-06|bb", "07|2018-02-07|xbxa"]);
    write_rows(dir.path(), "t1/year=2019/month=03/a.txt", &["08|2019-03-08|ab"]);

    let db = Database::load(dir.path()).unwrap();
    (dir, db)
}

pub fn count(db: &Database, query: &str) -> i64 {
    QueryExecutor.execute_query(query, db).unwrap().count.as_i64()
}
