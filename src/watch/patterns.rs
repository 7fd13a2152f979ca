// src/watch/patterns.rs

//! Ignore-pattern evaluation.
//!
//! Patterns follow shell-glob rules: `*`, `?` and `[...]` classes, with `*`
//! never crossing a path separator (`literal_separator`). `**` is accepted as
//! globset's "any number of directories" extension.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{GowatchError, Result};

/// Compile a single pattern, mapping syntax errors to
/// [`GowatchError::IgnorePattern`].
fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| GowatchError::IgnorePattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Test a single glob `pattern` against `path`.
pub fn matches(pattern: &str, path: &str) -> Result<bool> {
    Ok(compile(pattern)?.is_match(path))
}

/// Returns true on the first pattern (left to right) that matches `path`.
///
/// A malformed pattern is an error even if a later pattern would have
/// matched; patterns after the first match are never looked at.
pub fn is_ignored(patterns: &[String], path: &str) -> Result<bool> {
    for pattern in patterns {
        if matches(pattern, path)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Ordered, pre-compiled ignore patterns.
///
/// Building the set validates every pattern up front, so a session with a
/// bad pattern fails before it starts watching.
#[derive(Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<(String, GlobMatcher)>,
}

impl fmt::Debug for IgnoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.patterns.iter().map(|(p, _)| p))
            .finish()
    }
}

impl IgnoreSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Ok((p.clone(), compile(p)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern matching `path`, if any.
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, matcher)| matcher.is_match(path))
            .map(|(pattern, _)| pattern.as_str())
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }
}
