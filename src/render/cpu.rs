use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::core::{alloc_zeroed, buffer_len};
use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::palette::table::Palette;
use crate::render::composite::{blend_pixel, premul, unpremul};
use crate::render::sink::{BlendMode, RenderSink, SpriteFlags};
use crate::surface::image::Image;
use crate::surface::raster::{Pixels, Surface, SurfaceId};

/// Configuration for [`CpuSink`].
#[derive(Clone, Debug)]
pub struct CpuSinkOpts {
    /// Framebuffer width.
    pub width: u32,
    /// Framebuffer height.
    pub height: u32,
    /// Straight RGBA color the framebuffer is cleared to at the start of each frame.
    pub clear_rgba: [u8; 4],
    /// Maximum number of memoized conversions kept. `0` disables memoization entirely.
    pub cache_capacity: usize,
    /// Memoized conversions unused for this many frames are dropped.
    pub cache_idle_frames: u64,
}

impl Default for CpuSinkOpts {
    fn default() -> Self {
        Self {
            width: 320,
            height: 200,
            clear_rgba: [0, 0, 0, 255],
            cache_capacity: 256,
            cache_idle_frames: 120,
        }
    }
}

impl CpuSinkOpts {
    /// Defaults, with cache limits overridable through `PIXELOOM_UPLOAD_CACHE_CAPACITY` and
    /// `PIXELOOM_UPLOAD_CACHE_IDLE_FRAMES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self::default();
        if let Some(n) = lookup("PIXELOOM_UPLOAD_CACHE_CAPACITY").and_then(|v| v.parse::<usize>().ok())
        {
            opts.cache_capacity = n;
        }
        if let Some(n) = lookup("PIXELOOM_UPLOAD_CACHE_IDLE_FRAMES")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            opts.cache_idle_frames = n;
        }
        opts
    }
}

/// Finished frame in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
    /// Always `true` for frames produced by [`CpuSink`].
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the frame as an [`Image`].
    pub fn to_image(&self) -> PixeloomResult<Image> {
        let mut straight = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let px = [px[0], px[1], px[2], px[3]];
            straight.extend_from_slice(&if self.premultiplied { unpremul(px) } else { px });
        }
        let buf = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| PixeloomError::validation("frame buffer does not match dimensions"))?;
        Ok(Image::from_rgba_image(buf))
    }

    /// Straight RGBA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        Some(if self.premultiplied { unpremul(px) } else { px })
    }
}

/// Counters describing how indexed surfaces reached the framebuffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadStats {
    /// Draws served from a memoized conversion.
    pub hits: u64,
    /// Draws that converted and memoized.
    pub misses: u64,
    /// Draws of cache-disabled surfaces, converted every time.
    pub uncached: u64,
    /// Memoized conversions dropped for idleness or capacity.
    pub evictions: u64,
}

struct CachedUpload {
    rgba: Vec<u8>,
    palette_gen: u64,
    offset: u8,
    last_used: u64,
}

/// Memoized palette conversions keyed by surface identity.
struct UploadCache {
    entries: HashMap<SurfaceId, CachedUpload>,
    palette: Palette,
    palette_gen: u64,
    palette_offset: u8,
    capacity: usize,
    idle_frames: u64,
    frame_no: u64,
    stats: UploadStats,
}

impl UploadCache {
    /// RGBA bytes for `surface`, converting and memoizing as the cache policy allows.
    fn upload<'a>(&'a mut self, surface: &'a Surface) -> PixeloomResult<Cow<'a, [u8]>> {
        if let Pixels::Rgba(data) = surface.pixels() {
            return Ok(Cow::Borrowed(data.as_slice()));
        }

        let id = surface.id();
        if surface.cache_disabled() || self.capacity == 0 {
            self.entries.remove(&id);
            self.stats.uncached += 1;
            let rgba = surface.to_rgba_vec(&self.palette, None, self.palette_offset)?;
            return Ok(Cow::Owned(rgba));
        }

        let fresh = self.entries.get(&id).is_some_and(|e| {
            e.palette_gen == self.palette_gen && e.offset == self.palette_offset
        });
        if fresh {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let rgba = surface.to_rgba_vec(&self.palette, None, self.palette_offset)?;
            if !self.entries.contains_key(&id) && self.entries.len() >= self.capacity {
                self.evict_least_recent();
            }
            self.entries.insert(
                id,
                CachedUpload {
                    rgba,
                    palette_gen: self.palette_gen,
                    offset: self.palette_offset,
                    last_used: self.frame_no,
                },
            );
        }

        let frame_no = self.frame_no;
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| PixeloomError::validation("surface upload vanished from cache"))?;
        entry.last_used = frame_no;
        Ok(Cow::Borrowed(entry.rgba.as_slice()))
    }

    fn advance_frame(&mut self) {
        self.frame_no += 1;
        let now = self.frame_no;
        let idle = self.idle_frames;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.last_used) <= idle);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            self.stats.evictions += dropped as u64;
            tracing::debug!(dropped, frame = now, "evicted idle surface uploads");
        }
    }

    fn evict_least_recent(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(id, e)| (e.last_used, **id))
            .map(|(id, _)| *id)
        {
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            tracing::debug!(surface = oldest.as_u64(), "evicted surface upload at capacity");
        }
    }
}

/// Software rendering sink compositing surfaces into an RGBA framebuffer.
///
/// Indexed surfaces are converted through the sink's current palette and palette offset.
/// Conversions of cacheable surfaces are memoized per [`SurfaceId`] and reused while the id,
/// palette and offset stay the same; cache-disabled surfaces are converted on every draw.
pub struct CpuSink {
    clear_rgba: [u8; 4],
    frame: FrameRGBA,
    uploads: UploadCache,
}

impl CpuSink {
    /// Allocate the framebuffer and start with a grayscale palette.
    pub fn new(opts: CpuSinkOpts) -> PixeloomResult<Self> {
        let data = alloc_zeroed(buffer_len(opts.width, opts.height, 4)?)?;
        let mut sink = Self {
            clear_rgba: opts.clear_rgba,
            frame: FrameRGBA {
                width: opts.width,
                height: opts.height,
                data,
                premultiplied: true,
            },
            uploads: UploadCache {
                entries: HashMap::new(),
                palette: Palette::default(),
                palette_gen: 0,
                palette_offset: 0,
                capacity: opts.cache_capacity,
                idle_frames: opts.cache_idle_frames,
                frame_no: 0,
                stats: UploadStats::default(),
            },
        };
        sink.clear();
        Ok(sink)
    }

    /// Replace the palette used for indexed surfaces.
    pub fn set_palette(&mut self, palette: Palette) {
        self.uploads.palette = palette;
        self.uploads.palette_gen += 1;
    }

    /// Palette in use.
    pub fn palette(&self) -> &Palette {
        &self.uploads.palette
    }

    /// Set the palette rotation applied to every indexed draw (palette cycling).
    pub fn set_palette_offset(&mut self, offset: u8) {
        self.uploads.palette_offset = offset;
    }

    /// Clear the framebuffer and age the conversion cache. Call once per displayed frame.
    pub fn begin_frame(&mut self) {
        self.uploads.advance_frame();
        self.clear();
    }

    /// The composed frame.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Upload counters since creation.
    pub fn stats(&self) -> UploadStats {
        self.uploads.stats
    }

    /// Whether a conversion for `id` is currently memoized.
    pub fn is_cached(&self, id: SurfaceId) -> bool {
        self.uploads.entries.contains_key(&id)
    }

    /// Number of memoized conversions.
    pub fn cached_len(&self) -> usize {
        self.uploads.entries.len()
    }

    fn clear(&mut self) {
        let px = premul(self.clear_rgba);
        for d in self.frame.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }
}

impl RenderSink for CpuSink {
    fn render_surface(
        &mut self,
        surface: &Surface,
        x: i32,
        y: i32,
        blend: BlendMode,
        flags: SpriteFlags,
    ) -> PixeloomResult<()> {
        if surface.is_empty() {
            return Ok(());
        }
        let rgba = self.uploads.upload(surface)?;
        let frame = &mut self.frame;

        let (sw, sh) = (i64::from(surface.width()), i64::from(surface.height()));
        let (fw, fh) = (i64::from(frame.width), i64::from(frame.height));
        for sy in 0..sh {
            let ty = i64::from(y) + sy;
            if !(0..fh).contains(&ty) {
                continue;
            }
            let ry = if flags.contains(SpriteFlags::FLIP_VERTICAL) {
                sh - 1 - sy
            } else {
                sy
            };
            for sx in 0..sw {
                let tx = i64::from(x) + sx;
                if !(0..fw).contains(&tx) {
                    continue;
                }
                let rx = if flags.contains(SpriteFlags::FLIP_HORIZONTAL) {
                    sw - 1 - sx
                } else {
                    sx
                };
                let s = ((ry * sw + rx) as usize) * 4;
                let d = ((ty * fw + tx) as usize) * 4;
                let src = [rgba[s], rgba[s + 1], rgba[s + 2], rgba[s + 3]];
                let dst = [
                    frame.data[d],
                    frame.data[d + 1],
                    frame.data[d + 2],
                    frame.data[d + 3],
                ];
                frame.data[d..d + 4].copy_from_slice(&blend_pixel(dst, src, blend));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
