use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::{PixelFormat, alloc_copy, alloc_zeroed, buffer_len};
use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::surface::image::Image;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one constructed surface.
///
/// Sinks key memoized uploads by this id. A new id is handed out by every constructor and by
/// [`Surface::release`]; in-place mutation keeps the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Pixel payload of a surface, one shape per encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pixels {
    /// Row-major straight RGBA8.
    Rgba(Vec<u8>),
    /// Row-major palette indices plus an optional stencil (`0` = masked).
    Indexed {
        /// One index byte per pixel.
        index: Vec<u8>,
        /// One byte per pixel when present.
        stencil: Option<Vec<u8>>,
    },
}

impl Pixels {
    /// Encoding tag of this payload.
    pub fn format(&self) -> PixelFormat {
        match self {
            Self::Rgba(_) => PixelFormat::Rgba,
            Self::Indexed { .. } => PixelFormat::Indexed,
        }
    }

    fn try_clone(&self) -> PixeloomResult<Self> {
        Ok(match self {
            Self::Rgba(data) => Self::Rgba(alloc_copy(data)?),
            Self::Indexed { index, stencil } => Self::Indexed {
                index: alloc_copy(index)?,
                stencil: stencil.as_deref().map(alloc_copy).transpose()?,
            },
        })
    }
}

/// Exclusively owned raster buffer.
///
/// Invariant: the primary buffer holds exactly `width * height * bpp` bytes and a stencil, when
/// present, holds `width * height` bytes. A zero-area surface is valid and draws nothing.
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    width: u32,
    height: u32,
    pixels: Pixels,
    cache_disabled: bool,
}

impl Surface {
    /// Empty `0 x 0` RGBA surface.
    pub fn empty() -> Self {
        Self {
            id: SurfaceId::next(),
            width: 0,
            height: 0,
            pixels: Pixels::Rgba(Vec::new()),
            cache_disabled: false,
        }
    }

    /// Blank zero-filled surface. Indexed surfaces get a zeroed (fully masked) stencil.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> PixeloomResult<Self> {
        let len = buffer_len(width, height, format.bytes_per_pixel())?;
        let pixels = match format {
            PixelFormat::Rgba => Pixels::Rgba(alloc_zeroed(len)?),
            PixelFormat::Indexed => Pixels::Indexed {
                index: alloc_zeroed(len)?,
                stencil: Some(alloc_zeroed(len)?),
            },
        };
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Deep copy of an [`Image`] as an RGBA surface.
    pub fn from_image(img: &Image) -> PixeloomResult<Self> {
        let data = alloc_copy(img.as_raw())?;
        Ok(Self::from_parts(img.width(), img.height(), Pixels::Rgba(data)))
    }

    /// Deep copy of a raw buffer laid out for `format`. Indexed data gets no stencil.
    pub fn from_data(
        format: PixelFormat,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> PixeloomResult<Self> {
        let len = buffer_len(width, height, format.bytes_per_pixel())?;
        check_len("pixel data", len, data.len())?;
        let data = alloc_copy(data)?;
        let pixels = match format {
            PixelFormat::Rgba => Pixels::Rgba(data),
            PixelFormat::Indexed => Pixels::Indexed {
                index: data,
                stencil: None,
            },
        };
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Deep copy of decoded indexed pixels and their optional stencil.
    pub fn from_indexed(
        width: u32,
        height: u32,
        index: &[u8],
        stencil: Option<&[u8]>,
    ) -> PixeloomResult<Self> {
        let len = buffer_len(width, height, 1)?;
        check_len("index data", len, index.len())?;
        if let Some(s) = stencil {
            check_len("stencil", len, s.len())?;
        }
        let pixels = Pixels::Indexed {
            index: alloc_copy(index)?,
            stencil: stencil.map(alloc_copy).transpose()?,
        };
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Independent copy with identical encoding, dimensions and cache flag, under a new id.
    pub fn try_clone(&self) -> PixeloomResult<Self> {
        Ok(Self {
            id: SurfaceId::next(),
            width: self.width,
            height: self.height,
            pixels: self.pixels.try_clone()?,
            cache_disabled: self.cache_disabled,
        })
    }

    /// Free owned buffers and return to the empty state. Repeated calls are harmless.
    pub fn release(&mut self) {
        *self = Self::empty();
    }

    pub(crate) fn from_parts(width: u32, height: u32, pixels: Pixels) -> Self {
        Self {
            id: SurfaceId::next(),
            width,
            height,
            pixels,
            cache_disabled: false,
        }
    }

    /// Identity used by sinks for memoization.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for zero-area surfaces.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Encoding tag.
    pub fn format(&self) -> PixelFormat {
        self.pixels.format()
    }

    /// Borrow the tagged payload.
    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut Pixels {
        &mut self.pixels
    }

    pub(crate) fn set_pixels(&mut self, pixels: Pixels) {
        self.pixels = pixels;
    }

    /// RGBA bytes, if this is an RGBA surface.
    pub fn rgba(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Rgba(data) => Some(data),
            Pixels::Indexed { .. } => None,
        }
    }

    /// Index bytes, if this is an indexed surface.
    pub fn index(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Indexed { index, .. } => Some(index),
            Pixels::Rgba(_) => None,
        }
    }

    /// Stencil bytes, if this is an indexed surface that carries one.
    pub fn stencil(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Indexed { stencil, .. } => stencil.as_deref(),
            Pixels::Rgba(_) => None,
        }
    }

    /// When set, sinks must not reuse a converted/uploaded representation of this surface.
    pub fn cache_disabled(&self) -> bool {
        self.cache_disabled
    }

    /// Set or clear the cache-disabled flag. Owners of frequently rebuilt surfaces set this on
    /// every fresh instance.
    pub fn disable_cache(&mut self, disabled: bool) {
        self.cache_disabled = disabled;
    }

    /// Copy of an RGBA surface as an [`Image`] canvas.
    pub fn to_image(&self) -> PixeloomResult<Image> {
        let data = self
            .rgba()
            .ok_or_else(|| PixeloomError::encoding(PixelFormat::Rgba, self.format()))?;
        let buf = image::RgbaImage::from_raw(self.width, self.height, alloc_copy(data)?)
            .ok_or_else(|| PixeloomError::validation("surface buffer does not match dimensions"))?;
        Ok(Image::from_rgba_image(buf))
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_len(what: &str, expected: usize, got: usize) -> PixeloomResult<()> {
    if expected != got {
        return Err(PixeloomError::validation(format!(
            "{what} must be {expected} bytes, got {got}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
