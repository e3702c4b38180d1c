//! RGB565 pixel buffers.

use crate::error::{HxError, Result};

pub const BYTES_PER_PIXEL: usize = 2;

/// Pack 8-bit channels into RGB565.
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Little-endian RGB565 image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap already packed RGB565 bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if expected == 0 {
            return Err(HxError::InvalidInput(format!(
                "image has no pixels ({width}x{height})"
            )));
        }
        if data.len() != expected {
            return Err(HxError::InvalidInput(format!(
                "{width}x{height} image needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Convert tightly packed RGB8 triples.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let pixels = width as usize * height as usize;
        if rgb.len() != pixels * 3 {
            return Err(HxError::InvalidInput(format!(
                "{width}x{height} RGB8 image needs {} bytes, got {}",
                pixels * 3,
                rgb.len()
            )));
        }
        let mut data = Vec::with_capacity(pixels * BYTES_PER_PIXEL);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&rgb888_to_rgb565(px[0], px[1], px[2]).to_le_bytes());
        }
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / BYTES_PER_PIXEL
    }

    /// Pixel values in storage order.
    pub fn pixels(&self) -> impl Iterator<Item = u16> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| u16::from_le_bytes([px[0], px[1]]))
    }
}
