use crate::foundation::core::Rgba8;
use crate::foundation::error::PixeloomResult;
use crate::render::sink::{BlendMode, RenderSink, SpriteFlags};
use crate::surface::image::Image;
use crate::surface::raster::Surface;
use crate::widget::theme::ProgressBarTheme;
use crate::widget::{LayoutRect, Widget};

/// Side the filled block grows from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Block anchored at the left edge.
    #[default]
    Left,
    /// Block anchored at the right edge.
    Right,
}

/// Horizontal bar showing a percentage, with an optional flashing background.
///
/// The filled block is rebuilt only when the percentage actually changes, and is marked
/// cache-disabled because its content is replaced often.
#[derive(Debug)]
pub struct ProgressBar {
    theme: ProgressBarTheme,
    orientation: Orientation,
    percentage: u8,
    refresh: bool,
    flashing: bool,
    rate: u32,
    tick: u32,
    state: bool,
    rect: LayoutRect,
    background: Surface,
    background_alt: Surface,
    block: Surface,
}

impl ProgressBar {
    /// New bar; `percentage` is clamped to `0..=100`.
    pub fn new(theme: ProgressBarTheme, orientation: Orientation, percentage: i32) -> Self {
        Self {
            theme,
            orientation,
            percentage: clamp_percentage(percentage),
            refresh: true,
            flashing: false,
            rate: 0,
            tick: 0,
            state: false,
            rect: LayoutRect::default(),
            background: Surface::empty(),
            background_alt: Surface::empty(),
            block: Surface::empty(),
        }
    }

    /// Set the shown percentage, clamped to `0..=100`. A changed value schedules a block rebuild.
    pub fn set_progress(&mut self, percentage: i32) {
        let p = clamp_percentage(percentage);
        if !self.refresh {
            self.refresh = p != self.percentage;
        }
        self.percentage = p;
    }

    /// Stored percentage.
    pub fn progress(&self) -> u8 {
        self.percentage
    }

    /// Whether the block will be rebuilt on the next render.
    pub fn refresh_pending(&self) -> bool {
        self.refresh
    }

    /// Enable or disable background flashing. `rate` is the number of ticks held before each
    /// toggle; negative values mean `0`.
    pub fn set_flashing(&mut self, enabled: bool, rate: i32) {
        if enabled != self.flashing {
            self.tick = 0;
            self.state = false;
        }
        self.flashing = enabled;
        self.rate = u32::try_from(rate).unwrap_or(0);
    }

    /// `true` while the alternate background is shown.
    pub fn flash_state(&self) -> bool {
        self.state
    }

    /// Ticks counted since the last toggle.
    pub fn flash_tick(&self) -> u32 {
        self.tick
    }

    /// Current filled block; empty when the bar is too small to show one.
    pub fn block(&self) -> &Surface {
        &self.block
    }

    /// Backgrounds built by the last layout, normal then alternate.
    pub fn backgrounds(&self) -> (&Surface, &Surface) {
        (&self.background, &self.background_alt)
    }

    fn rebuild_block(&mut self) -> PixeloomResult<()> {
        self.block.release();
        let w = u32::try_from(u64::from(self.rect.w) * u64::from(self.percentage) / 100)
            .unwrap_or(u32::MAX);
        let h = self.rect.h;
        if w > 1 && h > 1 {
            let mut img = Image::new(w, h)?;
            img.clear(self.theme.int_bg);
            img.rect_bevel(
                0,
                0,
                edge(w),
                edge(h),
                self.theme.int_topleft,
                self.theme.int_bottomright,
                self.theme.int_bottomright,
                self.theme.int_topleft,
            );
            let mut block = Surface::from_image(&img)?;
            block.disable_cache(true);
            self.block = block;
        }
        tracing::debug!(percentage = self.percentage, width = w, "rebuilt progress block");
        Ok(())
    }

    fn block_x(&self) -> i32 {
        match self.orientation {
            Orientation::Left => self.rect.x,
            Orientation::Right => {
                let x = i64::from(self.rect.x) + i64::from(self.rect.w)
                    - i64::from(self.block.width())
                    + 1;
                x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
        }
    }

    fn build_background(&self, w: u32, h: u32, fill: Rgba8) -> PixeloomResult<Surface> {
        if w == 0 || h == 0 {
            return Ok(Surface::empty());
        }
        let mut img = Image::new(w, h)?;
        img.clear(fill);
        img.rect_bevel(
            0,
            0,
            edge(w),
            edge(h),
            self.theme.border_topleft,
            self.theme.border_bottomright,
            self.theme.border_bottomright,
            self.theme.border_topleft,
        );
        Surface::from_image(&img)
    }
}

impl Widget for ProgressBar {
    fn layout(&mut self, rect: LayoutRect) -> PixeloomResult<()> {
        let background = self.build_background(rect.w, rect.h, self.theme.bg)?;
        let background_alt = self.build_background(rect.w, rect.h, self.theme.bg_alt)?;
        self.rect = rect;
        self.background = background;
        self.background_alt = background_alt;
        self.block.release();
        self.block.disable_cache(true);
        self.refresh = true;
        Ok(())
    }

    fn tick(&mut self) {
        if !self.flashing {
            return;
        }
        self.tick += 1;
        if self.tick > self.rate {
            self.tick = 0;
            self.state = !self.state;
        }
    }

    fn render(&mut self, sink: &mut dyn RenderSink) -> PixeloomResult<()> {
        if self.refresh {
            self.rebuild_block()?;
            self.refresh = false;
        }

        let bg = if self.state {
            &self.background_alt
        } else {
            &self.background
        };
        sink.render_surface(bg, self.rect.x, self.rect.y, BlendMode::Alpha, SpriteFlags::empty())?;

        if !self.block.is_empty() {
            sink.render_surface(
                &self.block,
                self.block_x(),
                self.rect.y,
                BlendMode::Alpha,
                SpriteFlags::empty(),
            )?;
        }
        Ok(())
    }
}

fn clamp_percentage(p: i32) -> u8 {
    p.clamp(0, 100) as u8
}

fn edge(len: u32) -> i32 {
    i32::try_from(len.saturating_sub(1)).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/widget/progressbar.rs"]
mod tests;
