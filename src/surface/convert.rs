//! Palette-indexed to RGBA conversion.
//!
//! Both entry points share one transform. For each pixel:
//!
//! 1. `i = remap[raw]` when a remap table is given, else `raw`
//! 2. `i = (i + offset) mod 256`
//! 3. rgb = `palette[i]`; alpha = `0` if the stencil byte is `0`, else `255`
//!
//! The output is a pure function of (indices, stencil, palette, offset, remap), which is what
//! lets sinks memoize it.

use crate::foundation::core::{PixelFormat, alloc_zeroed, buffer_len};
use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::palette::table::{Palette, RemapTable};
use crate::surface::raster::{Pixels, Surface};

impl Surface {
    /// Replace this indexed surface's buffers with RGBA output and flip its tag.
    ///
    /// Fails with [`PixeloomError::EncodingMismatch`] on an RGBA surface, leaving it untouched.
    pub fn convert_to_rgba(&mut self, palette: &Palette, offset: u8) -> PixeloomResult<()> {
        let rgba = self.to_rgba_vec(palette, None, offset)?;
        self.set_pixels(Pixels::Rgba(rgba));
        Ok(())
    }

    /// Write RGBA output for this indexed surface into `dst` (`width * height * 4` bytes).
    pub fn to_rgba_into(
        &self,
        dst: &mut [u8],
        palette: &Palette,
        remap: Option<&RemapTable>,
        offset: u8,
    ) -> PixeloomResult<()> {
        let Pixels::Indexed { index, stencil } = self.pixels() else {
            return Err(PixeloomError::encoding(PixelFormat::Indexed, self.format()));
        };
        let expected = buffer_len(self.width(), self.height(), 4)?;
        if dst.len() != expected {
            return Err(PixeloomError::validation(format!(
                "rgba destination must be {expected} bytes, got {}",
                dst.len()
            )));
        }
        indexed_to_rgba(index, stencil.as_deref(), dst, palette, remap, offset);
        Ok(())
    }

    /// Allocating variant of [`Surface::to_rgba_into`].
    pub fn to_rgba_vec(
        &self,
        palette: &Palette,
        remap: Option<&RemapTable>,
        offset: u8,
    ) -> PixeloomResult<Vec<u8>> {
        if self.format() != PixelFormat::Indexed {
            return Err(PixeloomError::encoding(PixelFormat::Indexed, self.format()));
        }
        let mut out = alloc_zeroed(buffer_len(self.width(), self.height(), 4)?)?;
        self.to_rgba_into(&mut out, palette, remap, offset)?;
        Ok(out)
    }
}

/// Core transform over raw slices. `dst` must hold `4 * index.len()` bytes.
pub(crate) fn indexed_to_rgba(
    index: &[u8],
    stencil: Option<&[u8]>,
    dst: &mut [u8],
    palette: &Palette,
    remap: Option<&RemapTable>,
    offset: u8,
) {
    debug_assert_eq!(dst.len(), index.len() * 4);
    for (i, (out, &raw)) in dst.chunks_exact_mut(4).zip(index).enumerate() {
        let c = palette.resolve(raw, remap, offset);
        let visible = stencil.is_none_or(|s| s[i] != 0);
        out.copy_from_slice(&[c.r, c.g, c.b, if visible { 255 } else { 0 }]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/convert.rs"]
mod tests;
