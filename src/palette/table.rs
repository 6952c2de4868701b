use crate::foundation::core::Rgba8;
use crate::foundation::error::{PixeloomError, PixeloomResult};

/// Number of entries in every palette and remap table.
pub const PALETTE_SIZE: usize = 256;

/// Index-substitution table applied before palette lookup.
///
/// Always exactly 256 entries, so every raw index has a mapping and every mapped value is a
/// valid palette index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemapTable([u8; PALETTE_SIZE]);

impl RemapTable {
    /// Table mapping every index to itself.
    pub fn identity() -> Self {
        let mut out = [0u8; PALETTE_SIZE];
        for (i, v) in out.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self(out)
    }

    /// Build from a decoded slice. The slice must hold exactly 256 entries.
    pub fn from_slice(entries: &[u8]) -> PixeloomResult<Self> {
        let table: [u8; PALETTE_SIZE] = entries.try_into().map_err(|_| {
            PixeloomError::validation(format!(
                "remap table must have {PALETTE_SIZE} entries, got {}",
                entries.len()
            ))
        })?;
        Ok(Self(table))
    }

    /// Redirect `from` to `to`.
    pub fn set(&mut self, from: u8, to: u8) {
        self.0[usize::from(from)] = to;
    }

    /// Mapped index for `raw`.
    #[inline]
    pub fn get(&self, raw: u8) -> u8 {
        self.0[usize::from(raw)]
    }

    /// Borrow all entries.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::identity()
    }
}

/// Ordered table of 256 colors used to resolve indexed pixels.
///
/// Entry alpha is kept for callers that want it, but conversion treats every entry as opaque;
/// transparency comes from the surface stencil only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgba8; PALETTE_SIZE],
    remaps: Vec<RemapTable>,
}

impl Palette {
    /// Palette from exactly 256 colors.
    pub fn from_colors(colors: [Rgba8; PALETTE_SIZE]) -> Self {
        Self {
            colors,
            remaps: Vec::new(),
        }
    }

    /// Palette from packed 8-bit `r,g,b` triplets (768 bytes). Entries are opaque.
    pub fn from_rgb_bytes(rgb: &[u8]) -> PixeloomResult<Self> {
        if rgb.len() != PALETTE_SIZE * 3 {
            return Err(PixeloomError::validation(format!(
                "palette must have {} rgb bytes, got {}",
                PALETTE_SIZE * 3,
                rgb.len()
            )));
        }
        let mut colors = [Rgba8::TRANSPARENT; PALETTE_SIZE];
        for (dst, c) in colors.iter_mut().zip(rgb.chunks_exact(3)) {
            *dst = Rgba8::opaque(c[0], c[1], c[2]);
        }
        Ok(Self::from_colors(colors))
    }

    /// Palette from 6-bit VGA DAC triplets (values 0..=63), expanded to 8 bits.
    pub fn from_vga_6bit(rgb: &[u8]) -> PixeloomResult<Self> {
        if let Some(bad) = rgb.iter().find(|&&c| c > 63) {
            return Err(PixeloomError::validation(format!(
                "vga palette component {bad} exceeds 63"
            )));
        }
        let expanded: Vec<u8> = rgb.iter().map(|&c| (c << 2) | (c >> 4)).collect();
        Self::from_rgb_bytes(&expanded)
    }

    /// Attach recolor tables (e.g. one per player color slot).
    pub fn with_remaps(mut self, remaps: Vec<RemapTable>) -> Self {
        self.remaps = remaps;
        self
    }

    /// Color at `index`.
    #[inline]
    pub fn color(&self, index: u8) -> Rgba8 {
        self.colors[usize::from(index)]
    }

    /// Replace the color at `index`.
    pub fn set_color(&mut self, index: u8, color: Rgba8) {
        self.colors[usize::from(index)] = color;
    }

    /// All 256 colors.
    pub fn colors(&self) -> &[Rgba8; PALETTE_SIZE] {
        &self.colors
    }

    /// Recolor table `n`, if the palette carries one.
    pub fn remap(&self, n: usize) -> Option<&RemapTable> {
        self.remaps.get(n)
    }

    /// Number of recolor tables attached.
    pub fn remap_count(&self) -> usize {
        self.remaps.len()
    }

    /// Resolve a raw index through `remap` and `offset` (mod 256).
    #[inline]
    pub fn resolve(&self, raw: u8, remap: Option<&RemapTable>, offset: u8) -> Rgba8 {
        let idx = remap.map_or(raw, |t| t.get(raw));
        self.color(idx.wrapping_add(offset))
    }
}

impl Default for Palette {
    /// Grayscale ramp.
    fn default() -> Self {
        let mut colors = [Rgba8::TRANSPARENT; PALETTE_SIZE];
        for (i, c) in colors.iter_mut().enumerate() {
            let v = i as u8;
            *c = Rgba8::opaque(v, v, v);
        }
        Self::from_colors(colors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/table.rs"]
mod tests;
