//! Hexpack compactor — pixel data to C header conversion.
//!
//! Stages:
//! 1. Analyze — count repeating byte windows and score them
//! 2. Select — keep the best patterns and name them
//! 3. Encode — greedy substitution into literals and symbol references
//! 4. Render — raw, palette or pattern header text

pub mod analyze;
pub mod compressor;
pub mod encode;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod select;

pub use analyze::Candidate;
pub use compressor::PatternCompressor;
pub use encode::{decode, encode, EncodedStream, Token};
pub use pipeline::{HeaderPipeline, HeaderResult, Variant};
pub use select::{Pattern, SelectedPatternSet, Symbol};
