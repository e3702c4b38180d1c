//! Pattern selection and symbol naming.

use crate::analyze::Candidate;
use hx_core::PatternConfig;
use std::fmt;
use tracing::debug;

/// Macro name bound to one selected pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub symbol: Symbol,
    pub bytes: Vec<u8>,
    pub count: usize,
    pub score: u64,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Patterns chosen for substitution, highest score first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedPatternSet {
    patterns: Vec<Pattern>,
}

impl SelectedPatternSet {
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Rank of the first pattern that matches `buffer` at `pos`.
    pub fn match_at(&self, buffer: &[u8], pos: usize) -> Option<usize> {
        let rest = buffer.get(pos..)?;
        self.patterns.iter().position(|p| rest.starts_with(&p.bytes))
    }
}

impl<'a> IntoIterator for &'a SelectedPatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// Keep the top `max_patterns` candidates in rank order and name them.
///
/// Overlap between patterns is not considered.
pub fn select(candidates: Vec<Candidate>, config: &PatternConfig) -> SelectedPatternSet {
    let patterns: Vec<Pattern> = candidates
        .into_iter()
        .take(config.max_patterns)
        .enumerate()
        .map(|(i, c)| Pattern {
            symbol: Symbol::new(&config.symbol_prefix, i),
            bytes: c.bytes,
            count: c.count,
            score: c.score,
        })
        .collect();
    debug!(selected = patterns.len(), "patterns selected");
    SelectedPatternSet { patterns }
}
