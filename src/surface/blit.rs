use std::ops::Range;

use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::surface::raster::{Pixels, Surface};

/// How a sub-blit maps source columns onto destination columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitMethod {
    /// `dst(dx + c, dy + r) = src(sx + c, sy + r)`.
    #[default]
    Copy,
    /// `dst(dx + c, dy + r) = src(sx + width - 1 - c, sy + r)`; row order is preserved.
    Mirror,
}

/// Rectangle of a sub-blit request. Coordinates may be negative or past either surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubRect {
    /// Source left edge.
    pub src_x: i32,
    /// Source top edge.
    pub src_y: i32,
    /// Destination left edge.
    pub dst_x: i32,
    /// Destination top edge.
    pub dst_y: i32,
    /// Region width.
    pub width: u32,
    /// Region height.
    pub height: u32,
}

/// Columns `c` and rows `r` of a [`SubRect`] that land inside both surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClippedSpan {
    /// Valid `c` values.
    pub cols: Range<u32>,
    /// Valid `r` values.
    pub rows: Range<u32>,
}

impl ClippedSpan {
    /// Number of pixels the span covers.
    pub fn pixel_count(&self) -> usize {
        self.cols.len() * self.rows.len()
    }
}

/// Clip `rect` against a destination of `dst_size` and a source of `src_size` (both
/// `(width, height)`). Returns `None` when nothing is left to copy.
pub fn clip_sub_rect(
    dst_size: (u32, u32),
    src_size: (u32, u32),
    rect: &SubRect,
    method: BlitMethod,
) -> Option<ClippedSpan> {
    let (dw, dh) = (i64::from(dst_size.0), i64::from(dst_size.1));
    let (sw, sh) = (i64::from(src_size.0), i64::from(src_size.1));
    let (sx, sy) = (i64::from(rect.src_x), i64::from(rect.src_y));
    let (dx, dy) = (i64::from(rect.dst_x), i64::from(rect.dst_y));
    let (w, h) = (i64::from(rect.width), i64::from(rect.height));

    let row_lo = 0i64.max(-dy).max(-sy);
    let row_hi = h.min(dh - dy).min(sh - sy);

    let (col_lo, col_hi) = match method {
        BlitMethod::Copy => (0i64.max(-dx).max(-sx), w.min(dw - dx).min(sw - sx)),
        // src column sx + w - 1 - c must lie in [0, sw).
        BlitMethod::Mirror => (0i64.max(-dx).max(sx + w - sw), w.min(dw - dx).min(sx + w)),
    };

    if row_lo >= row_hi || col_lo >= col_hi {
        return None;
    }
    // Bounds are within [0, w] / [0, h], so they fit in u32.
    Some(ClippedSpan {
        cols: col_lo as u32..col_hi as u32,
        rows: row_lo as u32..row_hi as u32,
    })
}

/// Copy a rectangular region from `src` into `dst`, optionally mirrored horizontally.
///
/// The region is clipped to both surfaces; out-of-range parts are skipped silently. Stencil
/// bytes travel with index bytes when both surfaces carry a stencil. Returns the number of
/// pixels written.
///
/// Both surfaces must share an encoding; a mismatch is rejected before anything is written.
pub fn sub_blit(
    dst: &mut Surface,
    src: &Surface,
    rect: SubRect,
    method: BlitMethod,
) -> PixeloomResult<usize> {
    if dst.format() != src.format() {
        return Err(PixeloomError::encoding(dst.format(), src.format()));
    }
    let dst_w = dst.width();
    let Some(span) = clip_sub_rect(
        (dst_w, dst.height()),
        (src.width(), src.height()),
        &rect,
        method,
    ) else {
        return Ok(0);
    };

    let planes = Planes {
        dst_w: dst_w as usize,
        src_w: src.width() as usize,
        rect: &rect,
        span: &span,
        method,
    };
    match (dst.pixels_mut(), src.pixels()) {
        (Pixels::Rgba(d), Pixels::Rgba(s)) => planes.copy(d, s, 4),
        (
            Pixels::Indexed {
                index: di,
                stencil: ds,
            },
            Pixels::Indexed {
                index: si,
                stencil: ss,
            },
        ) => {
            planes.copy(di, si, 1);
            if let (Some(ds), Some(ss)) = (ds.as_mut(), ss.as_ref()) {
                planes.copy(ds, ss, 1);
            }
        }
        // Formats were compared above.
        (d, s) => return Err(PixeloomError::encoding(d.format(), s.format())),
    }
    Ok(span.pixel_count())
}

struct Planes<'a> {
    dst_w: usize,
    src_w: usize,
    rect: &'a SubRect,
    span: &'a ClippedSpan,
    method: BlitMethod,
}

impl Planes<'_> {
    /// Copy one plane with `bpp` bytes per pixel. All indices are pre-clipped.
    fn copy(&self, dst: &mut [u8], src: &[u8], bpp: usize) {
        let rect = self.rect;
        let (c0, c1) = (self.span.cols.start as i64, self.span.cols.end as i64);
        let last = i64::from(rect.width) - 1;

        for r in self.span.rows.clone() {
            let sy = (i64::from(rect.src_y) + i64::from(r)) as usize;
            let dy = (i64::from(rect.dst_y) + i64::from(r)) as usize;
            let src_row = sy * self.src_w;
            let dst_row = dy * self.dst_w;

            match self.method {
                BlitMethod::Copy => {
                    let sx = (i64::from(rect.src_x) + c0) as usize;
                    let dx = (i64::from(rect.dst_x) + c0) as usize;
                    let n = (c1 - c0) as usize * bpp;
                    let s = (src_row + sx) * bpp;
                    let d = (dst_row + dx) * bpp;
                    dst[d..d + n].copy_from_slice(&src[s..s + n]);
                }
                BlitMethod::Mirror => {
                    for c in c0..c1 {
                        let sx = (i64::from(rect.src_x) + last - c) as usize;
                        let dx = (i64::from(rect.dst_x) + c) as usize;
                        let s = (src_row + sx) * bpp;
                        let d = (dst_row + dx) * bpp;
                        dst[d..d + bpp].copy_from_slice(&src[s..s + bpp]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/blit.rs"]
mod tests;
