use std::fmt;

use crate::storage::{
    self, Database, ScanReport, Table, collect_column, field, for_each_dir_row, for_each_leaf_row,
};

#[cfg(test)]
mod tests;

mod parser;
mod pattern;
mod predicate;

pub use parser::{CompiledQuery, ComparePredicate, QueryDescriptor};
pub use pattern::LikeMatcher;
pub use predicate::Target;

/// Count reported for a query whose predicates both target partition keys
pub const UNSUPPORTED_SENTINEL: i64 = -1;

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Unknown partition key: {0}")]
    UnknownPartitionKey(String),
    #[error("Execution error: {0}")]
    ExecutionError(String),
}

impl From<storage::Error> for QueryError {
    fn from(e: storage::Error) -> Self {
        match e {
            storage::Error::TableNotFound(name) => QueryError::UnknownTable(name),
            storage::Error::PartitionKeyNotFound(name) => QueryError::UnknownPartitionKey(name),
            other => QueryError::ExecutionError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCount {
    Matched(u64),
    /// Recognized query shape with no evaluation strategy
    Unsupported,
}

impl MatchCount {
    pub fn as_i64(self) -> i64 {
        match self {
            MatchCount::Matched(n) => i64::try_from(n).unwrap_or(i64::MAX),
            MatchCount::Unsupported => UNSUPPORTED_SENTINEL,
        }
    }
}

impl fmt::Display for MatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// A count together with what the scan had to skip to produce it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub count: MatchCount,
    pub report: ScanReport,
}

pub struct QueryExecutor;

impl QueryExecutor {
    pub fn execute_query(&self, query: &str, db: &Database) -> Result<MatchOutcome, QueryError> {
        let compiled = QueryDescriptor::parse(query)?.compile()?;
        log::debug!("Parsed query: {:?}", compiled.descriptor);

        let table = db.table(&compiled.descriptor.table)?;
        self.evaluate(&compiled, table)
    }

    /// Picks the evaluation strategy from which predicates target partition keys.
    pub fn evaluate(&self, query: &CompiledQuery, table: &Table) -> Result<MatchOutcome, QueryError> {
        let compare = &query.descriptor.compare;
        let like = &query.descriptor.like;
        let mut report = ScanReport::default();

        let matched = match (&compare.target, &like.target) {
            (Target::Column { ordinal: cmp_col, .. }, Target::Column { ordinal: like_col, .. }) => {
                self.scan_columns(table, compare, *cmp_col, &query.matcher, *like_col, &mut report)
            }
            (Target::PartitionKey(key), Target::Column { ordinal, .. }) => {
                self.prune_by_compare(table, key, compare, &query.matcher, *ordinal, &mut report)?
            }
            (Target::Column { ordinal, .. }, Target::PartitionKey(key)) => {
                self.prune_by_like(table, key, &query.matcher, compare, *ordinal, &mut report)?
            }
            (Target::PartitionKey(cmp_key), Target::PartitionKey(like_key)) => {
                log::warn!(
                    "Unsupported query on table {}: both {} and {} are partition keys",
                    table.name(),
                    cmp_key,
                    like_key
                );
                return Ok(MatchOutcome {
                    count: MatchCount::Unsupported,
                    report,
                });
            }
        };

        Ok(MatchOutcome {
            count: MatchCount::Matched(matched),
            report,
        })
    }

    /// Both predicates on data columns: no pruning, every row of the table is read.
    ///
    /// Rows passing the compare predicate have their pattern column tested.
    fn scan_columns(
        &self,
        table: &Table,
        compare: &ComparePredicate,
        cmp_col: usize,
        matcher: &LikeMatcher,
        like_col: usize,
        report: &mut ScanReport,
    ) -> u64 {
        let mut matched = 0;
        let filter = |fields: &[&str]| {
            if compare.op.evaluate(field(fields, cmp_col)?, &compare.literal)
                && matcher.is_match(field(fields, like_col)?)
            {
                matched += 1;
            }
            Some(())
        };

        if table.is_partitioned() {
            for_each_leaf_row(table.partition_roots(), report, filter);
        } else {
            for_each_dir_row(table.base_dir(), report, filter);
        }

        matched
    }

    /// Compare predicate on a partition key: only subtrees whose key value passes
    /// the comparison are read.
    fn prune_by_compare(
        &self,
        table: &Table,
        key: &str,
        compare: &ComparePredicate,
        matcher: &LikeMatcher,
        like_col: usize,
        report: &mut ScanReport,
    ) -> Result<u64, QueryError> {
        let mut matched = 0;

        for node in table.index().nodes_for_key(key)? {
            if !compare.op.evaluate(node.value(), &compare.literal) {
                continue;
            }

            let values = collect_column(node, like_col, report);
            matched += values.iter().filter(|v| matcher.is_match(v)).count() as u64;
        }

        Ok(matched)
    }

    /// Pattern predicate on a partition key: only subtrees whose key value matches
    /// the patterns are read.
    fn prune_by_like(
        &self,
        table: &Table,
        key: &str,
        matcher: &LikeMatcher,
        compare: &ComparePredicate,
        cmp_col: usize,
        report: &mut ScanReport,
    ) -> Result<u64, QueryError> {
        let mut matched = 0;

        for node in table.index().nodes_for_key(key)? {
            if !matcher.is_match(node.value()) {
                continue;
            }

            let values = collect_column(node, cmp_col, report);
            matched += values
                .iter()
                .filter(|v| compare.op.evaluate(v, &compare.literal))
                .count() as u64;
        }

        Ok(matched)
    }
}
