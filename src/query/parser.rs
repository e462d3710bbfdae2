//! Query string grammar:
//!
//! ```text
//! <table> <target> <op> '<literal>' <target> <MODE> ['<pattern>',...]
//! ```
//!
//! Tokens are separated by single spaces; there are always exactly seven of them.

use std::fmt;
use std::str::FromStr;

use super::QueryError;
use super::pattern::LikeMatcher;
use super::predicate::{CompareOp, LikeMode, Target};

const TOKEN_COUNT: usize = 7;
pub const MAX_PATTERNS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparePredicate {
    pub target: Target,
    pub op: CompareOp,
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePredicate {
    pub target: Target,
    pub mode: LikeMode,
    pub patterns: Vec<String>,
}

/// A parsed query, before its patterns are compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub table: String,
    pub compare: ComparePredicate,
    pub like: LikePredicate,
}

/// A descriptor together with its compiled pattern matcher
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub descriptor: QueryDescriptor,
    pub matcher: LikeMatcher,
}

impl QueryDescriptor {
    /// Splits on single spaces; trailing whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim_end();
        let tokens: Vec<&str> = raw.split(' ').collect();
        if tokens.len() != TOKEN_COUNT {
            return Err(QueryError::ParseError(format!(
                "Expected {} tokens, found {}: {}",
                TOKEN_COUNT,
                tokens.len(),
                raw
            )));
        }

        let compare = ComparePredicate {
            target: Target::resolve(tokens[1])?,
            op: tokens[2].parse()?,
            literal: unquote(tokens[3])?.to_string(),
        };

        let like = LikePredicate {
            target: Target::resolve(tokens[4])?,
            mode: tokens[5].parse()?,
            patterns: parse_pattern_list(tokens[6])?,
        };

        Ok(Self {
            table: tokens[0].to_string(),
            compare,
            like,
        })
    }

    pub fn compile(self) -> Result<CompiledQuery, QueryError> {
        let matcher = LikeMatcher::compile(self.like.mode, self.like.patterns.as_slice())?;
        Ok(CompiledQuery {
            descriptor: self,
            matcher,
        })
    }
}

impl FromStr for QueryDescriptor {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<String> = self.like.patterns.iter().map(|p| format!("'{p}'")).collect();
        write!(
            f,
            "{} {} {} '{}' {} {} [{}]",
            self.table,
            self.compare.target,
            self.compare.op,
            self.compare.literal,
            self.like.target,
            self.like.mode,
            patterns.join(",")
        )
    }
}

/// Drops the first and last character of a quoted token. No unescaping is done.
pub fn unquote(token: &str) -> Result<&str, QueryError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => Ok(chars.as_str()),
        _ => Err(QueryError::ParseError(format!("Token too short to unquote: {:?}", token))),
    }
}

/// `['a%','_b']` -> `["a%", "_b"]`
pub fn parse_pattern_list(token: &str) -> Result<Vec<String>, QueryError> {
    let patterns = unquote(token)?
        .split(',')
        .map(|p| unquote(p).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    if patterns.is_empty() || patterns.len() > MAX_PATTERNS {
        return Err(QueryError::ParseError(format!(
            "Expected 1 to {} patterns, found {}",
            MAX_PATTERNS,
            patterns.len()
        )));
    }

    Ok(patterns)
}
