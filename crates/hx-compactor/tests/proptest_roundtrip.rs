//! Property-based tests for the pattern compressor.
//!
//! - decode(encode(buffer)) reproduces the buffer
//! - selection respects count, length and size bounds
//! - repeated runs are deterministic

use proptest::prelude::*;

use hx_compactor::{decode, encode, PatternCompressor, Token};
use hx_core::PatternConfig;

/// Even-length buffers drawn from a small alphabet so patterns repeat.
fn pixel_buffer_strategy() -> impl Strategy<Value = Vec<u8>> {
    (1usize..400).prop_flat_map(|pixels| {
        prop::collection::vec(prop_oneof![Just(0x00u8), Just(0xFF), Just(0x1F), Just(0xF8)], pixels * 2)
    })
}

/// Arbitrary even-length bytes.
fn noisy_buffer_strategy() -> impl Strategy<Value = Vec<u8>> {
    (1usize..200).prop_flat_map(|pixels| prop::collection::vec(any::<u8>(), pixels * 2))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_roundtrip(buf in pixel_buffer_strategy()) {
        let compressor = PatternCompressor::default();
        let (set, stream) = compressor.compress(&buf).unwrap();
        prop_assert_eq!(decode(&stream, &set).unwrap(), buf);
    }

    #[test]
    fn prop_roundtrip_noise(buf in noisy_buffer_strategy()) {
        let compressor = PatternCompressor::default();
        let (set, stream) = compressor.compress(&buf).unwrap();
        prop_assert_eq!(decode(&stream, &set).unwrap(), buf);
    }

    #[test]
    fn prop_selection_bounds(buf in pixel_buffer_strategy()) {
        let config = PatternConfig::default();
        let compressor = PatternCompressor::new(config.clone()).unwrap();
        let set = compressor.select(compressor.analyze(&buf).unwrap());
        prop_assert!(set.len() <= config.max_patterns);
        for p in &set {
            prop_assert!(p.count >= config.min_count);
            prop_assert!(p.len() % 2 == 0);
            prop_assert!((config.min_len..=config.max_len).contains(&p.len()));
        }
    }

    #[test]
    fn prop_deterministic(buf in pixel_buffer_strategy()) {
        let compressor = PatternCompressor::default();
        let first = compressor.compress(&buf).unwrap();
        let second = compressor.compress(&buf).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_no_literal_where_pattern_matches(buf in pixel_buffer_strategy()) {
        let compressor = PatternCompressor::default();
        let set = compressor.select(compressor.analyze(&buf).unwrap());
        let stream = encode(&buf, &set);
        let mut pos = 0;
        for token in stream.tokens() {
            match *token {
                Token::Literal(_) => {
                    prop_assert!(set.match_at(&buf, pos).is_none());
                    pos += 1;
                }
                Token::SymbolRef(rank) => {
                    prop_assert_eq!(set.match_at(&buf, pos), Some(rank));
                    pos += set.patterns()[rank].len();
                }
            }
        }
        prop_assert_eq!(pos, buf.len());
    }
}
