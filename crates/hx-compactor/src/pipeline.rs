//! Conversion pipeline — pixel buffer to header text.

use crate::compressor::PatternCompressor;
use crate::palette;
use crate::render::{self, HeaderSpec};
use hx_core::{ident, ConverterConfig, HxError, PixelBuffer, Result};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Every byte as a hex escape.
    Raw,
    /// The 26 most frequent colours as macros.
    Palette,
    /// Repeating byte sequences as macros.
    #[default]
    Pattern,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Palette => "palette",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "simple" => Ok(Self::Raw),
            "palette" | "macros" => Ok(Self::Palette),
            "pattern" | "variable" => Ok(Self::Pattern),
            other => Err(format!("unknown variant '{other}' (expected raw, palette or pattern)")),
        }
    }
}

/// Rendered header with statistics.
#[derive(Debug, Clone)]
pub struct HeaderResult {
    pub output: String,
    pub name: String,
    pub variant: Variant,
    /// Pixel data size in bytes.
    pub data_len: usize,
    pub output_len: usize,
    pub macros_defined: usize,
    /// Bytes still written as `\xHH` escapes.
    pub literal_bytes: usize,
}

impl HeaderResult {
    /// Header size relative to writing every byte as `\xHH`.
    pub fn ratio(&self) -> f64 {
        if self.data_len == 0 { return 1.0; }
        self.output_len as f64 / (self.data_len * 4) as f64
    }

    pub fn reduction_pct(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

pub struct HeaderPipeline {
    pub variant: Variant,
    config: ConverterConfig,
}

impl HeaderPipeline {
    pub fn new(variant: Variant) -> Self {
        Self { variant, config: ConverterConfig::default() }
    }

    pub fn with_config(variant: Variant, config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { variant, config })
    }

    pub fn raw() -> Self { Self::new(Variant::Raw) }
    pub fn palette() -> Self { Self::new(Variant::Palette) }
    pub fn pattern() -> Self { Self::new(Variant::Pattern) }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Render `pixels` as a header whose identifiers derive from `name`.
    pub fn convert(&self, pixels: &PixelBuffer, name: &str) -> Result<HeaderResult> {
        let name = ident::sanitize(name)?;
        let bytes = pixels.as_bytes();
        if bytes.is_empty() {
            return Err(HxError::InvalidInput("image has no pixel data".into()));
        }
        let spec = HeaderSpec { name: &name, width: pixels.width(), height: pixels.height() };
        let render_cfg = &self.config.render;

        let (output, macros_defined, literal_bytes) = match self.variant {
            Variant::Raw => (render::render_raw(&spec, bytes, render_cfg), 0, bytes.len()),
            Variant::Palette => {
                let palette = palette::build_palette(pixels.pixels(), render_cfg.palette_size);
                let literal_pixels = pixels.pixels().filter(|px| palette.lookup(*px).is_none()).count();
                let output = render::render_palette(&spec, pixels, &palette, render_cfg);
                (output, palette.len(), literal_pixels * hx_core::pixel::BYTES_PER_PIXEL)
            }
            Variant::Pattern => {
                let compressor = PatternCompressor::new(self.config.pattern.clone())?;
                let (set, stream) = compressor.compress(bytes)?;
                let output = render::render_pattern(&spec, &set, &stream, render_cfg)?;
                (output, set.len(), stream.literal_count())
            }
        };

        let result = HeaderResult {
            output_len: output.len(),
            output,
            name,
            variant: self.variant,
            data_len: bytes.len(),
            macros_defined,
            literal_bytes,
        };
        info!(
            name = %result.name,
            variant = %result.variant,
            data_len = result.data_len,
            output_len = result.output_len,
            macros = result.macros_defined,
            "header rendered"
        );
        Ok(result)
    }
}

impl Default for HeaderPipeline {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
