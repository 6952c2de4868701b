//! Frame-driven scene: a background, animation players and widgets.

use std::rc::Rc;

use crate::foundation::core::Ticks;
use crate::foundation::error::{PixeloomError, PixeloomResult};
use crate::render::sink::{BlendMode, RenderSink, SpriteFlags};
use crate::surface::raster::Surface;
use crate::widget::Widget;

pub(crate) mod animation;
pub(crate) mod player;

use animation::Animation;
use player::{AnimationPlayer, Playback};

/// Something advanced and drawn once per displayed frame.
pub trait FrameDriven {
    /// Advance state by `delta`.
    fn tick(&mut self, delta: Ticks) -> PixeloomResult<()>;

    /// Draw the state reached by the last [`FrameDriven::tick`].
    fn render(&mut self, delta: Ticks, sink: &mut dyn RenderSink) -> PixeloomResult<()>;
}

/// Run one frame: `tick` then `render`, always in that order.
#[tracing::instrument(skip_all, fields(delta = delta.0))]
pub fn drive_frame(
    target: &mut dyn FrameDriven,
    delta: Ticks,
    sink: &mut dyn RenderSink,
) -> PixeloomResult<()> {
    target.tick(delta)?;
    target.render(delta, sink)
}

/// Background, animations and the players currently running them.
pub struct Scene {
    background: Surface,
    animations: Vec<Rc<Animation>>,
    players: Vec<AnimationPlayer>,
    widgets: Vec<Box<dyn Widget>>,
    ticks: u64,
}

impl Scene {
    /// Scene over `background` with no animations.
    pub fn new(background: Surface) -> Self {
        Self {
            background,
            animations: Vec::new(),
            players: Vec::new(),
            widgets: Vec::new(),
            ticks: 0,
        }
    }

    /// Scene with `animations` registered in order; those marked load-on-start begin playing.
    #[tracing::instrument(skip_all, fields(animations = animations.len()))]
    pub fn load(background: Surface, animations: Vec<Animation>) -> Self {
        let mut scene = Self::new(background);
        for animation in animations {
            scene.add_animation(animation);
        }
        tracing::debug!(players = scene.players.len(), "scene loaded");
        scene
    }

    /// Register an animation and return its index.
    pub fn add_animation(&mut self, animation: Animation) -> usize {
        let idx = self.animations.len();
        let start = animation.load_on_start();
        let animation = Rc::new(animation);
        if start {
            tracing::debug!(animation = idx, "starting animation on load");
            self.players.push(AnimationPlayer::new(
                Rc::clone(&animation),
                0,
                0,
                Playback::Loop,
            ));
        }
        self.animations.push(animation);
        idx
    }

    /// Start playing animation `idx` at `(x, y)`.
    pub fn spawn(
        &mut self,
        idx: usize,
        x: i32,
        y: i32,
        flags: SpriteFlags,
        playback: Playback,
    ) -> PixeloomResult<()> {
        let animation = self
            .animations
            .get(idx)
            .ok_or_else(|| PixeloomError::validation(format!("unknown animation {idx}")))?;
        let mut player = AnimationPlayer::new(Rc::clone(animation), x, y, playback);
        player.set_flags(flags);
        self.players.push(player);
        Ok(())
    }

    /// Add a widget drawn above the players.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
    }

    /// Replace the background.
    pub fn set_background(&mut self, background: Surface) {
        self.background = background;
    }

    /// Current background.
    pub fn background(&self) -> &Surface {
        &self.background
    }

    /// Registered animation `idx`.
    pub fn animation(&self, idx: usize) -> Option<&Animation> {
        self.animations.get(idx).map(Rc::as_ref)
    }

    /// Running players.
    pub fn players(&self) -> &[AnimationPlayer] {
        &self.players
    }

    /// Ticks accumulated since the scene was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameDriven for Scene {
    fn tick(&mut self, delta: Ticks) -> PixeloomResult<()> {
        self.ticks += u64::from(delta.0);
        for player in &mut self.players {
            player.advance(delta);
        }
        self.players.retain(|p| !p.is_finished());
        for widget in &mut self.widgets {
            widget.tick();
        }
        Ok(())
    }

    fn render(&mut self, _delta: Ticks, sink: &mut dyn RenderSink) -> PixeloomResult<()> {
        if !self.background.is_empty() {
            sink.render_surface(&self.background, 0, 0, BlendMode::Opaque, SpriteFlags::empty())?;
        }
        for player in &self.players {
            player.render(sink)?;
        }
        for widget in &mut self.widgets {
            widget.render(sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
