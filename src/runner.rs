//! Batch evaluation: query lines in, one count per line out

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::Instant;

use crate::config::RunConfig;
use crate::query::{MatchCount, QueryExecutor, UNSUPPORTED_SENTINEL};
use crate::storage::{self, Database};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub queries: usize,
    pub failed: usize,
    pub unsupported: usize,
    pub unreadable_files: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("Failed to load database: {0}")]
    Load(#[from] storage::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Evaluates every non-blank line of `input`, writing one result line per query.
///
/// A query that fails (parse error, unknown table or key, invalid pattern) is logged
/// and written as the same `-1` used for unsupported predicate shapes, so the output
/// stays aligned with the input; the rest of the batch still runs. The two cases are
/// told apart by `BatchSummary::failed` and `BatchSummary::unsupported`.
pub fn run_batch<R: BufRead, W: Write>(
    db: &Database,
    input: R,
    mut output: W,
) -> io::Result<BatchSummary> {
    let executor = QueryExecutor;
    let mut summary = BatchSummary::default();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.queries += 1;

        let count = match executor.execute_query(&line, db) {
            Ok(outcome) => {
                if !outcome.report.is_complete() {
                    summary.unreadable_files += outcome.report.unreadable.len();
                }
                if outcome.count == MatchCount::Unsupported {
                    summary.unsupported += 1;
                }
                outcome.count.as_i64()
            }
            Err(e) => {
                log::error!("Query failed: {}: {}", line, e);
                summary.failed += 1;
                UNSUPPORTED_SENTINEL
            }
        };

        writeln!(output, "{}", count)?;
    }

    output.flush()?;
    Ok(summary)
}

/// Loads the database and runs the query file named by `config`
pub fn run(config: &RunConfig) -> Result<BatchSummary, RunError> {
    let start = Instant::now();
    let db = Database::load(&config.database_dir)?;
    if config.verbose() {
        println!("Loaded {} table(s)\n{}", db.len(), db);
    }

    let input = BufReader::new(File::open(&config.queries_path)?);
    let output = BufWriter::new(File::create(&config.output_path)?);
    let summary = run_batch(&db, input, output)?;

    if config.verbose() {
        println!(
            "Answered {} queries ({} failed, {} unsupported) in {}ms",
            summary.queries,
            summary.failed,
            summary.unsupported,
            start.elapsed().as_millis()
        );
    }

    Ok(summary)
}
