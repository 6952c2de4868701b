//! Frame-driven UI components drawn through a [`RenderSink`](crate::RenderSink).

use crate::foundation::error::PixeloomResult;
use crate::render::sink::RenderSink;

pub(crate) mod progressbar;
pub(crate) mod theme;

/// Placement assigned to a widget by its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

/// A component that owns its surfaces and draws them each frame.
pub trait Widget {
    /// Place the widget and build any size-dependent surfaces.
    fn layout(&mut self, rect: LayoutRect) -> PixeloomResult<()>;

    /// Advance time-based state by one frame.
    fn tick(&mut self);

    /// Draw the current state.
    fn render(&mut self, sink: &mut dyn RenderSink) -> PixeloomResult<()>;
}
