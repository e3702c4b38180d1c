//! Analyze → Select → Encode behind one value.

use crate::analyze::{self, Candidate};
use crate::encode::{self, EncodedStream};
use crate::select::{self, SelectedPatternSet};
use hx_core::{PatternConfig, Result};

#[derive(Debug, Clone, Default)]
pub struct PatternCompressor {
    config: PatternConfig,
}

impl PatternCompressor {
    pub fn new(config: PatternConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn analyze(&self, buffer: &[u8]) -> Result<Vec<Candidate>> {
        analyze::analyze(buffer, &self.config)
    }

    pub fn select(&self, candidates: Vec<Candidate>) -> SelectedPatternSet {
        select::select(candidates, &self.config)
    }

    pub fn encode(&self, buffer: &[u8], set: &SelectedPatternSet) -> EncodedStream {
        encode::encode(buffer, set)
    }

    pub fn decode(&self, stream: &EncodedStream, set: &SelectedPatternSet) -> Result<Vec<u8>> {
        encode::decode(stream, set)
    }

    /// Run all three phases.
    pub fn compress(&self, buffer: &[u8]) -> Result<(SelectedPatternSet, EncodedStream)> {
        let candidates = self.analyze(buffer)?;
        let set = self.select(candidates);
        let stream = self.encode(buffer, &set);
        Ok((set, stream))
    }
}
