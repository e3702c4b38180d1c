pub mod config;
pub mod error;
pub mod ident;
pub mod pixel;

pub use config::{ConverterConfig, PatternConfig, RenderConfig};
pub use error::{HxError, Result};
pub use pixel::{rgb888_to_rgb565, PixelBuffer};
