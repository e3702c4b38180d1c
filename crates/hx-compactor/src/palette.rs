//! Most frequent colours bound to `C_A`..`C_Z`.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const MAX_PALETTE: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub color: u16,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    by_color: HashMap<u16, usize>,
}

impl Palette {
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Macro name bound to `color`, if it made the palette.
    pub fn lookup(&self, color: u16) -> Option<&str> {
        self.by_color
            .get(&color)
            .map(|&i| self.entries[i].name.as_str())
    }
}

/// `C_A` for 0 through `C_Z` for 25.
pub fn palette_name(index: usize) -> Option<String> {
    (index < MAX_PALETTE).then(|| format!("C_{}", (b'A' + index as u8) as char))
}

/// Count colours and keep the `size` most frequent (at most 26).
///
/// Equal counts rank by ascending colour value.
pub fn build_palette(pixels: impl IntoIterator<Item = u16>, size: usize) -> Palette {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for px in pixels {
        *counts.entry(px).or_insert(0) += 1;
    }
    let distinct = counts.len();

    let mut ranked: Vec<(u16, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let entries: Vec<PaletteEntry> = ranked
        .into_iter()
        .take(size.min(MAX_PALETTE))
        .enumerate()
        .filter_map(|(i, (color, count))| {
            Some(PaletteEntry { name: palette_name(i)?, color, count })
        })
        .collect();
    let by_color = entries.iter().enumerate().map(|(i, e)| (e.color, i)).collect();

    debug!(distinct, palette = entries.len(), "palette built");
    Palette { entries, by_color }
}
