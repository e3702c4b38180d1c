use crate::error::{HxError, Result};
use crate::ident;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Shortest pattern worth a macro, in bytes.
pub const MIN_PATTERN_LEN: usize = 6;
/// Longest pattern window, in bytes.
pub const MAX_PATTERN_LEN: usize = 32;
/// Fewer occurrences never pay for the `#define`.
pub const MIN_OCCURRENCES: usize = 3;
pub const MAX_PATTERNS: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub pattern: PatternConfig,
    pub render: RenderConfig,
}

/// Pattern search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Shortest window, in bytes. Must be even.
    pub min_len: usize,
    /// Longest window, in bytes. Must be even.
    pub max_len: usize,
    /// Occurrences below this never become candidates.
    pub min_count: usize,
    pub max_patterns: usize,
    pub symbol_prefix: String,
}

/// Text layout of the generated header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// A pending literal run is flushed once its escaped text exceeds this.
    pub literal_flush_chars: usize,
    /// Pattern body breaks the line every time this many bytes are consumed.
    pub wrap_bytes: usize,
    pub raw_bytes_per_line: usize,
    pub pixels_per_line: usize,
    pub palette_size: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_len: MIN_PATTERN_LEN,
            max_len: MAX_PATTERN_LEN,
            min_count: MIN_OCCURRENCES,
            max_patterns: MAX_PATTERNS,
            symbol_prefix: "M".into(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            literal_flush_chars: 120,
            wrap_bytes: 32,
            raw_bytes_per_line: 16,
            pixels_per_line: 8,
            palette_size: 26,
        }
    }
}

impl ConverterConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.pattern.validate()?;
        self.render.validate()
    }
}

impl PatternConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_len < MIN_PATTERN_LEN || self.min_len % 2 != 0 {
            return Err(HxError::InvalidConfig(format!(
                "min_len must be even and at least {MIN_PATTERN_LEN}, got {}",
                self.min_len
            )));
        }
        if self.max_len > MAX_PATTERN_LEN || self.max_len % 2 != 0 {
            return Err(HxError::InvalidConfig(format!(
                "max_len must be even and at most {MAX_PATTERN_LEN}, got {}",
                self.max_len
            )));
        }
        if self.min_len > self.max_len {
            return Err(HxError::InvalidConfig(format!(
                "min_len {} exceeds max_len {}",
                self.min_len, self.max_len
            )));
        }
        if self.min_count < MIN_OCCURRENCES {
            return Err(HxError::InvalidConfig(format!(
                "min_count must be at least {MIN_OCCURRENCES}, got {}",
                self.min_count
            )));
        }
        if self.max_patterns > MAX_PATTERNS {
            return Err(HxError::InvalidConfig(format!(
                "max_patterns must be at most {MAX_PATTERNS}, got {}",
                self.max_patterns
            )));
        }
        if !ident::is_identifier(&self.symbol_prefix) {
            return Err(HxError::InvalidConfig(format!(
                "symbol_prefix {:?} is not a C identifier",
                self.symbol_prefix
            )));
        }
        Ok(())
    }

    /// Window lengths scanned, shortest first.
    pub fn lengths(&self) -> impl Iterator<Item = usize> {
        (self.min_len..=self.max_len).step_by(2)
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        let widths = [
            ("literal_flush_chars", self.literal_flush_chars),
            ("wrap_bytes", self.wrap_bytes),
            ("raw_bytes_per_line", self.raw_bytes_per_line),
            ("pixels_per_line", self.pixels_per_line),
        ];
        for (name, value) in widths {
            if value == 0 {
                return Err(HxError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }
        if !(1..=26).contains(&self.palette_size) {
            return Err(HxError::InvalidConfig(format!(
                "palette_size must be within 1..=26, got {}",
                self.palette_size
            )));
        }
        Ok(())
    }
}
