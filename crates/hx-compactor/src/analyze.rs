//! Pattern analysis: count repeating byte windows and score them.

use hx_core::{HxError, PatternConfig, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Header characters one raw byte costs (`\xHH`).
const ESCAPE_CHARS: usize = 4;

/// A repeating byte sequence with its occurrence count and estimated savings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub count: usize,
    pub score: u64,
}

/// Estimated characters saved by replacing `count` occurrences of a
/// `len`-byte window with a macro name.
pub fn score(len: usize, count: usize) -> u64 {
    (len * ESCAPE_CHARS).saturating_sub(ESCAPE_CHARS) as u64 * count as u64
}

/// Reject buffers the pixel pipeline can never produce.
pub fn validate_buffer(buffer: &[u8]) -> Result<()> {
    if buffer.is_empty() {
        return Err(HxError::InvalidInput("empty buffer".into()));
    }
    if buffer.len() % 2 != 0 {
        return Err(HxError::InvalidInput(format!(
            "buffer length {} is not a whole number of 16-bit pixels",
            buffer.len()
        )));
    }
    Ok(())
}

/// Count every window of every configured length that starts on a pixel
/// boundary. Keys borrow from `buffer`; iteration is in ascending byte order.
pub fn count_windows<'a>(buffer: &'a [u8], config: &PatternConfig) -> BTreeMap<&'a [u8], usize> {
    let mut counts: BTreeMap<&[u8], usize> = BTreeMap::new();
    for len in config.lengths() {
        if len > buffer.len() {
            continue;
        }
        for start in (0..=buffer.len() - len).step_by(2) {
            *counts.entry(&buffer[start..start + len]).or_insert(0) += 1;
        }
    }
    counts
}

/// Find candidates occurring at least `min_count` times, best score first.
///
/// Equal scores keep ascending byte order, so output is deterministic.
pub fn analyze(buffer: &[u8], config: &PatternConfig) -> Result<Vec<Candidate>> {
    validate_buffer(buffer)?;

    let counts = count_windows(buffer, config);
    let distinct = counts.len();

    let mut candidates: Vec<Candidate> = counts
        .into_iter()
        .filter(|(_, count)| *count >= config.min_count)
        .map(|(bytes, count)| Candidate {
            bytes: bytes.to_vec(),
            count,
            score: score(bytes.len(), count),
        })
        .collect();
    // stable: ties stay in map order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        bytes = buffer.len(),
        distinct,
        candidates = candidates.len(),
        "pattern analysis complete"
    );
    Ok(candidates)
}
