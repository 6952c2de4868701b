use crate::foundation::core::PixelFormat;
use crate::foundation::error::PixeloomResult;
use crate::surface::raster::{Surface, SurfaceId};

/// How a surface is combined with what is already in the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replace destination pixels; source alpha is ignored.
    Opaque,
    /// Source-over using the surface alpha (stencil-masked pixels are skipped).
    #[default]
    Alpha,
}

bitflags::bitflags! {
    /// Orientation flags for a single draw.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct SpriteFlags: u8 {
        /// Mirror left-right.
        const FLIP_HORIZONTAL = 0b01;
        /// Mirror top-bottom.
        const FLIP_VERTICAL = 0b10;
    }
}

/// Rendering sink: the one primitive the surface engine hands finished surfaces to.
///
/// Implementations may memoize conversion/upload work per [`SurfaceId`] but must not reuse it
/// for a surface whose [`Surface::cache_disabled`] flag is set.
pub trait RenderSink {
    /// Draw `surface` with its top-left corner at `(x, y)`.
    fn render_surface(
        &mut self,
        surface: &Surface,
        x: i32,
        y: i32,
        blend: BlendMode,
        flags: SpriteFlags,
    ) -> PixeloomResult<()>;
}

/// One call captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCall {
    /// Identity of the drawn surface.
    pub surface: SurfaceId,
    /// Encoding of the drawn surface.
    pub format: PixelFormat,
    /// Surface width.
    pub width: u32,
    /// Surface height.
    pub height: u32,
    /// Target x.
    pub x: i32,
    /// Target y.
    pub y: i32,
    /// Blend mode.
    pub blend: BlendMode,
    /// Orientation flags.
    pub flags: SpriteFlags,
    /// Cache flag at the time of the call.
    pub cache_disabled: bool,
}

/// Sink that records calls without drawing. Useful for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Vec<DrawCall>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls seen so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render_surface(
        &mut self,
        surface: &Surface,
        x: i32,
        y: i32,
        blend: BlendMode,
        flags: SpriteFlags,
    ) -> PixeloomResult<()> {
        self.calls.push(DrawCall {
            surface: surface.id(),
            format: surface.format(),
            width: surface.width(),
            height: surface.height(),
            x,
            y,
            blend,
            flags,
            cache_disabled: surface.cache_disabled(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
