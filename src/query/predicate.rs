use std::fmt;
use std::str::FromStr;

use super::QueryError;

/// Comparison operator of the compare predicate.
///
/// Values are always compared as strings, byte-wise lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    Less,
    Equal,
    NotEqual,
}

impl CompareOp {
    pub fn evaluate(self, value: &str, literal: &str) -> bool {
        match self {
            CompareOp::Greater => value > literal,
            CompareOp::Less => value < literal,
            CompareOp::Equal => value == literal,
            CompareOp::NotEqual => value != literal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Greater => ">",
            CompareOp::Less => "<",
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
        }
    }
}

impl FromStr for CompareOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(CompareOp::Greater),
            "<" => Ok(CompareOp::Less),
            "=" => Ok(CompareOp::Equal),
            "!=" => Ok(CompareOp::NotEqual),
            _ => Err(QueryError::ParseError(format!(
                "Unsupported compare operator: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the compiled patterns of a pattern predicate are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMode {
    /// Every pattern must match
    AllLike,
    /// At least one pattern must match
    AnyLike,
    /// No pattern may match
    NoneLike,
}

impl LikeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LikeMode::AllLike => "ALL_LIKE",
            LikeMode::AnyLike => "ANY_LIKE",
            LikeMode::NoneLike => "NONE_LIKE",
        }
    }
}

impl FromStr for LikeMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL_LIKE" => Ok(LikeMode::AllLike),
            "ANY_LIKE" => Ok(LikeMode::AnyLike),
            "NONE_LIKE" => Ok(LikeMode::NoneLike),
            _ => Err(QueryError::ParseError(format!("Unsupported like mode: {}", s))),
        }
    }
}

impl fmt::Display for LikeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a predicate is applied to: a data column or a partition key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `columnN`; `ordinal` indexes the `|`-split row
    Column { name: String, ordinal: usize },
    PartitionKey(String),
}

impl Target {
    /// Any name containing `column` is a data column whose ordinal is its trailing digit.
    pub fn resolve(name: &str) -> Result<Self, QueryError> {
        if !name.contains("column") {
            return Ok(Target::PartitionKey(name.to_string()));
        }

        let ordinal = name
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| {
                QueryError::ParseError(format!("Column reference without trailing digit: {}", name))
            })?;

        Ok(Target::Column {
            name: name.to_string(),
            ordinal: ordinal as usize,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Column { name, .. } => name,
            Target::PartitionKey(name) => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
