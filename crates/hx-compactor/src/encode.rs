//! Greedy encoding of a buffer into literal bytes and symbol references.

use crate::select::SelectedPatternSet;
use hx_core::{HxError, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    /// Rank of a pattern in the `SelectedPatternSet`.
    SymbolRef(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    tokens: Vec<Token>,
}

impl EncodedStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn literal_count(&self) -> usize {
        self.tokens.iter().filter(|t| matches!(t, Token::Literal(_))).count()
    }

    pub fn symbol_ref_count(&self) -> usize {
        self.tokens.len() - self.literal_count()
    }
}

/// Encode `buffer` left to right.
///
/// At each position the highest-ranked matching pattern wins, even when a
/// lower-ranked one would cover more bytes. No lookahead, no backtracking.
pub fn encode(buffer: &[u8], set: &SelectedPatternSet) -> EncodedStream {
    let mut tokens = Vec::with_capacity(buffer.len());
    let mut pos = 0;
    while pos < buffer.len() {
        match set.match_at(buffer, pos) {
            Some(rank) => {
                tokens.push(Token::SymbolRef(rank));
                pos += set.patterns()[rank].len();
            }
            None => {
                tokens.push(Token::Literal(buffer[pos]));
                pos += 1;
            }
        }
    }
    let stream = EncodedStream { tokens };
    debug!(
        tokens = stream.len(),
        literals = stream.literal_count(),
        "buffer encoded"
    );
    stream
}

/// Expand a stream back into bytes.
pub fn decode(stream: &EncodedStream, set: &SelectedPatternSet) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(stream.len());
    for token in stream.tokens() {
        match *token {
            Token::Literal(b) => out.push(b),
            Token::SymbolRef(rank) => {
                let pattern = set.get(rank).ok_or_else(|| {
                    HxError::InvalidInput(format!(
                        "symbol reference {rank} outside a set of {} patterns",
                        set.len()
                    ))
                })?;
                out.extend_from_slice(&pattern.bytes);
            }
        }
    }
    Ok(out)
}
