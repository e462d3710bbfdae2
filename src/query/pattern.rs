use regex::{Regex, RegexBuilder};

use super::QueryError;
use super::predicate::LikeMode;

// Private-use code points stand in for escaped wildcards while the others are rewritten.
const ESCAPED_PERCENT: &str = "\u{E000}";
const ESCAPED_UNDERSCORE: &str = "\u{E001}";

/// Translates a LIKE pattern into a regular expression body.
///
/// `%` matches any run of characters and `_` exactly one; `\%` and `\_` are the
/// literal characters. Only `.` and `*` are escaped, every other character is passed
/// through as-is.
pub fn like_to_regex(pattern: &str) -> String {
    pattern
        .replace("\\%", ESCAPED_PERCENT)
        .replace("\\_", ESCAPED_UNDERSCORE)
        .replace('.', "\\.")
        .replace('*', "\\*")
        .replace('%', ".*")
        .replace('_', ".")
        .replace(ESCAPED_PERCENT, "%")
        .replace(ESCAPED_UNDERSCORE, "_")
}

/// A LIKE pattern compiled into a whole-string, case-sensitive matcher
#[derive(Debug, Clone)]
pub struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    pub fn compile(raw: &str) -> Result<Self, QueryError> {
        let expr = format!(r"\A(?:{})\z", like_to_regex(raw));
        let regex = RegexBuilder::new(&expr)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| QueryError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;

        Ok(Self { regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// The pattern half of a query: compiled patterns plus their combination mode
#[derive(Debug, Clone)]
pub struct LikeMatcher {
    mode: LikeMode,
    patterns: Vec<LikePattern>,
}

impl LikeMatcher {
    pub fn compile<S: AsRef<str>>(mode: LikeMode, patterns: &[S]) -> Result<Self, QueryError> {
        let patterns = patterns
            .iter()
            .map(|p| LikePattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { mode, patterns })
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self.mode {
            LikeMode::AllLike => self.patterns.iter().all(|p| p.is_match(value)),
            LikeMode::AnyLike => self.patterns.iter().any(|p| p.is_match(value)),
            LikeMode::NoneLike => !self.patterns.iter().any(|p| p.is_match(value)),
        }
    }
}
