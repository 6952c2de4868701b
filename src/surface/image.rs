use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Rgba8, alloc_zeroed, buffer_len};
use crate::foundation::error::{PixeloomError, PixeloomResult};

/// Transient RGBA working canvas.
///
/// Used to stage composed content (fills, beveled frames) before it is captured into an owned
/// [`Surface`](crate::Surface) with [`Surface::from_image`](crate::Surface::from_image). The
/// surface takes a deep copy; the image can be dropped or reused afterwards.
#[derive(Clone, Debug)]
pub struct Image {
    buf: image::RgbaImage,
}

impl Image {
    /// Transparent canvas of `width x height`.
    pub fn new(width: u32, height: u32) -> PixeloomResult<Self> {
        let bytes = alloc_zeroed(buffer_len(width, height, 4)?)?;
        let buf = image::RgbaImage::from_raw(width, height, bytes)
            .ok_or_else(|| PixeloomError::validation("image buffer does not match dimensions"))?;
        Ok(Self { buf })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Row-major RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.buf.as_raw()
    }

    /// Fill the whole canvas with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        let px = image::Rgba(color.to_array());
        for p in self.buf.pixels_mut() {
            *p = px;
        }
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some((x, y)) = self.inside(x, y) {
            self.buf.put_pixel(x, y, image::Rgba(color.to_array()));
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.inside(x, y)
            .map(|(x, y)| Rgba8::from(self.buf.get_pixel(x, y).0))
    }

    /// Fill the `w x h` rectangle at `(x, y)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba8) {
        let (x0, x1) = self.clip_span(i64::from(x), i64::from(x) + i64::from(w), self.width());
        let (y0, y1) = self.clip_span(i64::from(y), i64::from(y) + i64::from(h), self.height());
        let px = image::Rgba(color.to_array());
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.buf.put_pixel(xx, yy, px);
            }
        }
    }

    /// Draw a one pixel beveled outline whose corners are `(x, y)` and `(x + w, y + h)`.
    ///
    /// Edges are drawn top, right, bottom, left; later edges own the shared corners. Only the
    /// parts of each edge that lie on the canvas are walked.
    #[allow(clippy::too_many_arguments)]
    pub fn rect_bevel(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        top: Rgba8,
        right: Rgba8,
        bottom: Rgba8,
        left: Rgba8,
    ) {
        let (x0, y0) = (i64::from(x), i64::from(y));
        let (x1, y1) = (x0 + i64::from(w), y0 + i64::from(h));
        self.hline(x0, x1, y0, top);
        self.vline(x1, y0, y1, right);
        self.hline(x0, x1, y1, bottom);
        self.vline(x0, y0, y1, left);
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> PixeloomResult<()> {
        let path = path.as_ref();
        self.buf
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    pub(crate) fn from_rgba_image(buf: image::RgbaImage) -> Self {
        Self { buf }
    }

    fn inside(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.buf.width() && y < self.buf.height()).then_some((x, y))
    }

    /// `[lo, hi)` clamped to `[0, len)`; empty when nothing is left.
    fn clip_span(&self, lo: i64, hi: i64, len: u32) -> (u32, u32) {
        let lo = lo.clamp(0, i64::from(len));
        let hi = hi.clamp(lo, i64::from(len));
        (lo as u32, hi as u32)
    }

    /// Pixels `(xa..=xb, y)` that fall on the canvas.
    fn hline(&mut self, xa: i64, xb: i64, y: i64, color: Rgba8) {
        let Ok(y) = u32::try_from(y) else { return };
        if y >= self.height() {
            return;
        }
        let (lo, hi) = self.clip_span(xa, xb + 1, self.width());
        let px = image::Rgba(color.to_array());
        for x in lo..hi {
            self.buf.put_pixel(x, y, px);
        }
    }

    /// Pixels `(x, ya..=yb)` that fall on the canvas.
    fn vline(&mut self, x: i64, ya: i64, yb: i64, color: Rgba8) {
        let Ok(x) = u32::try_from(x) else { return };
        if x >= self.width() {
            return;
        }
        let (lo, hi) = self.clip_span(ya, yb + 1, self.height());
        let px = image::Rgba(color.to_array());
        for y in lo..hi {
            self.buf.put_pixel(x, y, px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/image.rs"]
mod tests;
