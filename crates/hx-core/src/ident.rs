//! C identifier helpers for generated header names.

use crate::error::{HxError, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static RE_INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Whether `s` is a valid C identifier.
pub fn is_identifier(s: &str) -> bool {
    RE_IDENT.is_match(s)
}

/// Turn a file stem such as `logo-small.v2` into `logo_small_v2`.
pub fn sanitize(stem: &str) -> Result<String> {
    let trimmed = stem.trim();
    if trimmed.is_empty() {
        return Err(HxError::InvalidInput("empty identifier".into()));
    }
    let mut name = RE_INVALID_CHARS.replace_all(trimmed, "_").to_string();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Ok(name)
}

/// Include guard for a header named after `name`.
pub fn include_guard(name: &str) -> String {
    format!("_{name}_H_")
}
