use crate::foundation::core::{alloc_zeroed, buffer_len};
use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::surface::blit::{BlitMethod, SubRect, sub_blit};
use crate::surface::raster::{Pixels, Surface};

/// A surface plus the offset it is drawn at relative to its owner's position.
#[derive(Debug)]
pub struct Sprite {
    /// Pixels.
    pub surface: Surface,
    /// Horizontal draw offset.
    pub offset_x: i32,
    /// Vertical draw offset.
    pub offset_y: i32,
}

/// One step of an [`Animation`].
#[derive(Debug)]
pub struct AnimationFrame {
    /// What to draw.
    pub sprite: Sprite,
    /// How long the frame is shown, in ticks. Always at least 1.
    pub duration: u32,
}

/// Cell of a sprite atlas used by [`Animation::from_atlas`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtlasCell {
    /// Left edge in the atlas.
    pub x: i32,
    /// Top edge in the atlas.
    pub y: i32,
    /// Cell width.
    pub width: u32,
    /// Cell height.
    pub height: u32,
    /// Horizontal draw offset of the resulting sprite.
    pub offset_x: i32,
    /// Vertical draw offset of the resulting sprite.
    pub offset_y: i32,
    /// Ticks the frame is shown.
    pub duration: u32,
    /// Take the cell left-right mirrored.
    pub mirror: bool,
}

/// Ordered sprite frames with per-frame durations.
#[derive(Debug)]
pub struct Animation {
    frames: Vec<AnimationFrame>,
    load_on_start: bool,
}

impl Animation {
    /// Animation over `frames`. Rejects an empty list and zero durations.
    pub fn new(frames: Vec<AnimationFrame>) -> PixeloomResult<Self> {
        if frames.is_empty() {
            return Err(PixeloomError::validation("animation needs at least one frame"));
        }
        if let Some(i) = frames.iter().position(|f| f.duration == 0) {
            return Err(PixeloomError::validation(format!(
                "animation frame {i} has zero duration"
            )));
        }
        Ok(Self {
            frames,
            load_on_start: false,
        })
    }

    /// Cut frames out of `atlas`. Each cell is copied into its own surface in the atlas
    /// encoding; parts of a cell outside the atlas stay blank.
    pub fn from_atlas(atlas: &Surface, cells: &[AtlasCell]) -> PixeloomResult<Self> {
        let mut frames = Vec::with_capacity(cells.len());
        for cell in cells {
            let mut surface = blank_like(atlas, cell.width, cell.height)?;
            let method = if cell.mirror {
                BlitMethod::Mirror
            } else {
                BlitMethod::Copy
            };
            let rect = SubRect {
                src_x: cell.x,
                src_y: cell.y,
                dst_x: 0,
                dst_y: 0,
                width: cell.width,
                height: cell.height,
            };
            sub_blit(&mut surface, atlas, rect, method)?;
            frames.push(AnimationFrame {
                sprite: Sprite {
                    surface,
                    offset_x: cell.offset_x,
                    offset_y: cell.offset_y,
                },
                duration: cell.duration,
            });
        }
        Self::new(frames)
    }

    /// Mark the animation to get a player as soon as it is added to a scene.
    pub fn with_load_on_start(mut self, load_on_start: bool) -> Self {
        self.load_on_start = load_on_start;
        self
    }

    /// Whether a scene starts this animation on its own.
    pub fn load_on_start(&self) -> bool {
        self.load_on_start
    }

    /// Frames in playback order.
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Sum of all frame durations.
    pub fn total_duration(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration)).sum()
    }
}

// Indexed atlases without a stencil produce stencil-free cells, so cells stay fully visible.
fn blank_like(atlas: &Surface, width: u32, height: u32) -> PixeloomResult<Surface> {
    match atlas.pixels() {
        Pixels::Indexed { stencil: None, .. } => {
            let index = alloc_zeroed(buffer_len(width, height, 1)?)?;
            Ok(Surface::from_parts(
                width,
                height,
                Pixels::Indexed {
                    index,
                    stencil: None,
                },
            ))
        }
        _ => Surface::new(atlas.format(), width, height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
