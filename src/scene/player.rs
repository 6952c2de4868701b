use std::rc::Rc;

use crate::foundation::core::Ticks;
use crate::foundation::error::PixeloomResult;
use crate::render::sink::{BlendMode, RenderSink, SpriteFlags};
use crate::scene::animation::{Animation, Sprite};

/// What a player does after the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Start over from the first frame.
    #[default]
    Loop,
    /// Stop and report finished.
    Once,
}

/// Plays one [`Animation`] at a position.
#[derive(Debug)]
pub struct AnimationPlayer {
    animation: Rc<Animation>,
    x: i32,
    y: i32,
    flags: SpriteFlags,
    playback: Playback,
    frame: usize,
    elapsed: u64,
    finished: bool,
}

impl AnimationPlayer {
    /// Player at `(x, y)` positioned on the first frame.
    pub fn new(animation: Rc<Animation>, x: i32, y: i32, playback: Playback) -> Self {
        Self {
            animation,
            x,
            y,
            flags: SpriteFlags::empty(),
            playback,
            frame: 0,
            elapsed: 0,
            finished: false,
        }
    }

    /// Draw orientation. A horizontal flip also mirrors the sprite offset around `x`.
    pub fn set_flags(&mut self, flags: SpriteFlags) {
        self.flags = flags;
    }

    /// Move the player.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Index of the frame currently shown.
    pub fn current_frame(&self) -> usize {
        self.frame
    }

    /// Sprite currently shown.
    pub fn current_sprite(&self) -> Option<&Sprite> {
        self.animation.frames().get(self.frame).map(|f| &f.sprite)
    }

    /// `true` once a [`Playback::Once`] player has run past its last frame.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance playback by `delta` ticks.
    pub fn advance(&mut self, delta: Ticks) {
        if self.finished {
            return;
        }
        let frames = self.animation.frames();
        self.elapsed += u64::from(delta.0);
        if self.playback == Playback::Loop {
            let total = self.animation.total_duration();
            let remaining: u64 = frames[self.frame..]
                .iter()
                .map(|f| u64::from(f.duration))
                .sum();
            if self.elapsed >= remaining + total {
                self.elapsed = (self.elapsed - remaining) % total;
                self.frame = 0;
            }
        }
        while self.elapsed >= u64::from(frames[self.frame].duration) {
            self.elapsed -= u64::from(frames[self.frame].duration);
            if self.frame + 1 < frames.len() {
                self.frame += 1;
            } else if self.playback == Playback::Loop {
                self.frame = 0;
            } else {
                self.elapsed = 0;
                self.finished = true;
                break;
            }
        }
    }

    /// Draw the current sprite. Finished players draw nothing.
    pub fn render(&self, sink: &mut dyn RenderSink) -> PixeloomResult<()> {
        if self.finished {
            return Ok(());
        }
        let Some(sprite) = self.current_sprite() else {
            return Ok(());
        };
        let x = if self.flags.contains(SpriteFlags::FLIP_HORIZONTAL) {
            let w = i32::try_from(sprite.surface.width()).unwrap_or(i32::MAX);
            self.x.saturating_sub(sprite.offset_x).saturating_sub(w)
        } else {
            self.x.saturating_add(sprite.offset_x)
        };
        let y = self.y.saturating_add(sprite.offset_y);
        sink.render_surface(&sprite.surface, x, y, BlendMode::Alpha, self.flags)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/player.rs"]
mod tests;
