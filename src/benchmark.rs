use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

use crate::query::QueryExecutor;
use crate::storage::Database;

const NUM_ROWS: usize = 200_000;
const ROWS_PER_FILE: usize = 10_000;
const DAY_RANGE: i64 = 4 * 365;
const WORDS: [&str; 6] = ["alpha", "beta", "gamma", "abba", "cab", "delta"];

const QUERIES: [(&str, &str); 5] = [
    ("Unpartitioned scan", "flat column0 > '100000' column1 ANY_LIKE ['2019%','2020%']"),
    ("Full partition scan", "events column0 != '000000' column2 ALL_LIKE ['%a%','%b%']"),
    ("Prune by compare", "events year > '2018' column2 ANY_LIKE ['%ab%']"),
    ("Prune by like", "events column1 < '2019-06-01' month NONE_LIKE ['01','02']"),
    ("Unsupported shape", "events year = '2019' month ANY_LIKE ['0_']"),
];

pub fn run_benchmarks(dir: &Path) -> io::Result<()> {
    println!("Generating {} rows under {}...", NUM_ROWS, dir.display());
    let start = Instant::now();
    let rows = generate_test_data();
    write_unpartitioned(&dir.join("flat"), &rows)?;
    write_partitioned(&dir.join("events"), &rows)?;
    println!("Generated in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    let start = Instant::now();
    let db = Database::load(dir).map_err(io::Error::other)?;
    println!("Loaded {} tables in {:.2}ms", db.len(), start.elapsed().as_secs_f64() * 1000.0);

    println!("\nRunning query benchmarks...");
    let executor = QueryExecutor;
    for (name, query) in QUERIES {
        let start = Instant::now();
        let result = executor.execute_query(query, &db);
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        match result {
            Ok(outcome) => println!("{}: count={} in {:.2}ms", name, outcome.count, elapsed),
            Err(e) => println!("{}: failed: {}", name, e),
        }
    }

    Ok(())
}

struct Row {
    id: usize,
    date: NaiveDate,
    word: &'static str,
}

fn generate_test_data() -> Vec<Row> {
    let mut rng = rand::rng();
    let epoch = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or_default();

    (0..NUM_ROWS)
        .map(|id| Row {
            id,
            date: epoch + Duration::days(rng.random_range(0..DAY_RANGE)),
            word: WORDS[rng.random_range(0..WORDS.len())],
        })
        .collect()
}

fn write_rows(path: &Path, rows: &[&Row]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(writer, "{:06}|{}|{}", row.id, row.date.format("%Y-%m-%d"), row.word)?;
    }
    writer.flush()
}

fn write_unpartitioned(table_dir: &Path, rows: &[Row]) -> io::Result<()> {
    fs::create_dir_all(table_dir)?;
    let rows: Vec<&Row> = rows.iter().collect();
    for (i, chunk) in rows.chunks(ROWS_PER_FILE).enumerate() {
        write_rows(&table_dir.join(format!("part-{:05}.txt", i)), chunk)?;
    }
    Ok(())
}

fn write_partitioned(table_dir: &Path, rows: &[Row]) -> io::Result<()> {
    let mut leaves: BTreeMap<(i32, u32), Vec<&Row>> = BTreeMap::new();
    for row in rows {
        leaves.entry((row.date.year(), row.date.month())).or_default().push(row);
    }

    for ((year, month), rows) in leaves {
        let leaf = table_dir
            .join(format!("year={}", year))
            .join(format!("month={:02}", month));
        fs::create_dir_all(&leaf)?;
        for (i, chunk) in rows.chunks(ROWS_PER_FILE).enumerate() {
            write_rows(&leaf.join(format!("part-{:05}.txt", i)), chunk)?;
        }
    }
    Ok(())
}
