use crate::foundation::error::{PixeloomError, PixeloomResult};

/// Pixel encoding tag carried by every surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Straight (non-premultiplied) RGBA8, 4 bytes per pixel.
    Rgba,
    /// One palette index byte per pixel, optionally with a parallel stencil byte.
    Indexed,
}

impl PixelFormat {
    /// Bytes per pixel in the primary buffer.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba => 4,
            Self::Indexed => 1,
        }
    }
}

/// Straight RGBA8 color.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels in memory order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

/// Opaque, non-negative time advance handed to `tick`/`render` by the frame loop.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Ticks(pub u32);

/// `width * height * bytes_per_pixel`, or an allocation error when it does not fit in `usize`.
pub(crate) fn buffer_len(width: u32, height: u32, bytes_per_pixel: usize) -> PixeloomResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(bytes_per_pixel))
        .ok_or(PixeloomError::Allocation { bytes: usize::MAX })
}

/// Zero-filled buffer of exactly `len` bytes. Allocator refusal is reported, never aborted on.
pub(crate) fn alloc_zeroed(len: usize) -> PixeloomResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| refused(len))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Owned copy of `src` with the same allocation guarantees as [`alloc_zeroed`].
pub(crate) fn alloc_copy(src: &[u8]) -> PixeloomResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| refused(src.len()))?;
    buf.extend_from_slice(src);
    Ok(buf)
}

fn refused(bytes: usize) -> PixeloomError {
    tracing::warn!(bytes, "pixel buffer allocation refused");
    PixeloomError::Allocation { bytes }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
