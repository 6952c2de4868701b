use super::*;
use crate::foundation::core::PixelFormat;
use crate::foundation::error::PixeloomError;
use crate::render::sink::RecordingSink;
use crate::widget::theme::ThemeRegistry;

fn health() -> ProgressBarTheme {
    ThemeRegistry::builtin().unwrap().get("health").unwrap().clone()
}

fn laid_out(orientation: Orientation, pct: i32, w: u32, h: u32) -> ProgressBar {
    let mut bar = ProgressBar::new(health(), orientation, pct);
    bar.layout(LayoutRect { x: 10, y: 20, w, h }).unwrap();
    bar
}

#[test]
fn percentage_is_clamped_and_refresh_tracks_real_changes() {
    let mut bar = laid_out(Orientation::Left, 50, 100, 8);
    bar.render(&mut RecordingSink::new()).unwrap();
    assert!(!bar.refresh_pending());

    bar.set_progress(150);
    assert_eq!(bar.progress(), 100);
    assert!(bar.refresh_pending());
    bar.render(&mut RecordingSink::new()).unwrap();

    bar.set_progress(100);
    assert!(!bar.refresh_pending());
    bar.set_progress(120);
    assert!(!bar.refresh_pending());

    bar.set_progress(-5);
    assert_eq!(bar.progress(), 0);
    assert!(bar.refresh_pending());
}

#[test]
fn refresh_stays_set_until_render() {
    let mut bar = laid_out(Orientation::Left, 10, 100, 8);
    bar.render(&mut RecordingSink::new()).unwrap();
    bar.set_progress(20);
    bar.set_progress(10);
    assert!(bar.refresh_pending());
}

#[test]
fn flashing_toggles_after_rate_plus_one_ticks() {
    let mut bar = laid_out(Orientation::Left, 0, 10, 4);
    bar.set_flashing(true, 3);
    for _ in 0..3 {
        bar.tick();
        assert!(!bar.flash_state());
    }
    bar.tick();
    assert!(bar.flash_state());
    assert_eq!(bar.flash_tick(), 0);

    for _ in 0..4 {
        bar.tick();
    }
    assert!(!bar.flash_state());
}

#[test]
fn disabling_flashing_resets_counter_and_state() {
    let mut bar = laid_out(Orientation::Left, 0, 10, 4);
    bar.set_flashing(true, 0);
    bar.tick();
    bar.tick();
    bar.tick();
    assert!(bar.flash_state());
    bar.set_flashing(false, 0);
    assert!(!bar.flash_state());
    assert_eq!(bar.flash_tick(), 0);

    bar.tick();
    assert!(!bar.flash_state());
}

#[test]
fn negative_rate_is_zero() {
    let mut bar = laid_out(Orientation::Left, 0, 10, 4);
    bar.set_flashing(true, -7);
    bar.tick();
    assert!(bar.flash_state());
}

#[test]
fn block_width_is_floored_and_cache_disabled() {
    let mut bar = laid_out(Orientation::Left, 33, 10, 6);
    bar.render(&mut RecordingSink::new()).unwrap();
    let block = bar.block();
    assert_eq!((block.width(), block.height()), (3, 6));
    assert_eq!(block.format(), PixelFormat::Rgba);
    assert!(block.cache_disabled());

    let img = block.to_image().unwrap();
    let t = health();
    assert_eq!(img.get_pixel(1, 1), Some(t.int_bg));
    assert_eq!(img.get_pixel(0, 0), Some(t.int_topleft));
    assert_eq!(img.get_pixel(0, 5), Some(t.int_topleft));
    assert_eq!(img.get_pixel(2, 5), Some(t.int_bottomright));
    assert_eq!(img.get_pixel(2, 0), Some(t.int_bottomright));
}

#[test]
fn tiny_block_is_not_drawn() {
    let mut bar = laid_out(Orientation::Left, 1, 100, 6);
    let mut rec = RecordingSink::new();
    bar.render(&mut rec).unwrap();
    assert!(bar.block().is_empty());
    assert_eq!(rec.calls().len(), 1);
}

#[test]
fn rebuild_replaces_the_block_surface() {
    let mut bar = laid_out(Orientation::Left, 50, 100, 6);
    bar.render(&mut RecordingSink::new()).unwrap();
    let first = bar.block().id();
    bar.render(&mut RecordingSink::new()).unwrap();
    assert_eq!(bar.block().id(), first);

    bar.set_progress(60);
    bar.render(&mut RecordingSink::new()).unwrap();
    assert_ne!(bar.block().id(), first);
    assert_eq!(bar.block().width(), 60);
}

#[test]
fn render_draws_background_then_block() {
    let mut bar = laid_out(Orientation::Left, 50, 40, 6);
    let mut rec = RecordingSink::new();
    bar.render(&mut rec).unwrap();
    let calls = rec.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].surface, bar.backgrounds().0.id());
    assert_eq!((calls[0].x, calls[0].y), (10, 20));
    assert_eq!(calls[1].surface, bar.block().id());
    assert_eq!(calls[1].x, 10);
    assert!(calls[1].cache_disabled);
    assert!(!calls[0].cache_disabled);
}

#[test]
fn flashing_bar_draws_the_alternate_background() {
    let mut bar = laid_out(Orientation::Left, 0, 40, 6);
    bar.set_flashing(true, 0);
    bar.tick();
    let mut rec = RecordingSink::new();
    bar.render(&mut rec).unwrap();
    assert_eq!(rec.calls()[0].surface, bar.backgrounds().1.id());
}

#[test]
fn right_orientation_anchors_block_at_the_right_edge() {
    let mut bar = laid_out(Orientation::Right, 25, 40, 6);
    let mut rec = RecordingSink::new();
    bar.render(&mut rec).unwrap();
    assert_eq!(bar.block().width(), 10);
    assert_eq!(rec.calls()[1].x, 10 + 40 - 10 + 1);
}

#[test]
fn backgrounds_carry_the_theme_border() {
    let bar = laid_out(Orientation::Left, 0, 5, 4);
    let t = health();
    let (bg, _) = bar.backgrounds();
    let img = bg.to_image().unwrap();
    assert_eq!(img.get_pixel(0, 0), Some(t.border_topleft));
    assert_eq!(img.get_pixel(4, 1), Some(t.border_bottomright));
    assert_eq!(img.get_pixel(2, 2), Some(t.bg));
}

#[test]
fn failed_block_rebuild_is_retried_on_next_render() {
    let mut bar = laid_out(Orientation::Left, 50, 100, 8);
    bar.render(&mut RecordingSink::new()).unwrap();

    bar.rect = LayoutRect {
        x: 0,
        y: 0,
        w: u32::MAX,
        h: u32::MAX,
    };
    bar.set_progress(60);
    let err = bar.render(&mut RecordingSink::new()).unwrap_err();
    assert!(matches!(err, PixeloomError::Allocation { .. }));
    assert!(bar.refresh_pending());
    assert!(bar.block().is_empty());

    bar.rect = LayoutRect {
        x: 10,
        y: 20,
        w: 100,
        h: 8,
    };
    bar.render(&mut RecordingSink::new()).unwrap();
    assert!(!bar.refresh_pending());
    assert_eq!(bar.block().width(), 60);
}

#[test]
fn failed_layout_keeps_previous_placement() {
    let mut bar = laid_out(Orientation::Left, 50, 40, 6);
    let bg = bar.backgrounds().0.id();
    let err = bar
        .layout(LayoutRect {
            x: 0,
            y: 0,
            w: u32::MAX,
            h: u32::MAX,
        })
        .unwrap_err();
    assert!(matches!(err, PixeloomError::Allocation { .. }));
    assert_eq!(bar.backgrounds().0.id(), bg);

    let mut rec = RecordingSink::new();
    bar.render(&mut rec).unwrap();
    assert_eq!((rec.calls()[0].x, rec.calls()[0].y), (10, 20));
    assert_eq!(bar.block().width(), 20);
}
