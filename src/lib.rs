//! Pixeloom is the sprite surface layer of a frame-driven 2D renderer.
//!
//! It owns raster buffers in two encodings (straight RGBA and 8-bit palette indices with an
//! optional stencil), copies rectangular regions between them, resolves indexed pixels through a
//! 256-entry palette, and hands finished surfaces to a [`RenderSink`]:
//!
//! - Build a [`Surface`] from raw data, a decoded indexed buffer or a staged [`Image`]
//! - Cut and mirror regions with [`sub_blit`]
//! - Convert through a [`Palette`] with an optional [`RemapTable`] and palette offset
//! - Draw through [`CpuSink`], which memoizes conversions per [`SurfaceId`]
//!
//! [`Scene`], [`AnimationPlayer`] and [`ProgressBar`] are the frame-driven consumers.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod palette;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod surface;
pub(crate) mod widget;

pub use crate::foundation::core::{PixelFormat, Rgba8, Ticks};
pub use crate::foundation::error::{PixeloomError, PixeloomResult};

pub use crate::palette::table::{PALETTE_SIZE, Palette, RemapTable};
pub use crate::render::cpu::{CpuSink, CpuSinkOpts, FrameRGBA, UploadStats};
pub use crate::render::sink::{BlendMode, DrawCall, RecordingSink, RenderSink, SpriteFlags};
pub use crate::scene::animation::{Animation, AnimationFrame, AtlasCell, Sprite};
pub use crate::scene::player::{AnimationPlayer, Playback};
pub use crate::scene::{FrameDriven, Scene, drive_frame};
pub use crate::surface::blit::{BlitMethod, ClippedSpan, SubRect, clip_sub_rect, sub_blit};
pub use crate::surface::image::Image;
pub use crate::surface::raster::{Pixels, Surface, SurfaceId};
pub use crate::widget::progressbar::{Orientation, ProgressBar};
pub use crate::widget::theme::{ProgressBarTheme, ThemeRegistry};
pub use crate::widget::{LayoutRect, Widget};
