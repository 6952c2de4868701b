use super::*;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);
const GREEN: Rgba8 = Rgba8::opaque(0, 255, 0);
const GRAY: Rgba8 = Rgba8::opaque(50, 50, 50);

#[test]
fn new_image_is_transparent() {
    let img = Image::new(3, 2).unwrap();
    assert_eq!(img.as_raw().len(), 24);
    assert!(img.as_raw().iter().all(|&b| b == 0));
}

#[test]
fn zero_area_image_is_valid() {
    let img = Image::new(0, 5).unwrap();
    assert!(img.as_raw().is_empty());
}

#[test]
fn out_of_bounds_pixels_are_ignored() {
    let mut img = Image::new(2, 2).unwrap();
    img.set_pixel(-1, 0, RED);
    img.set_pixel(2, 0, RED);
    img.set_pixel(0, 5, RED);
    assert!(img.as_raw().iter().all(|&b| b == 0));
    assert_eq!(img.get_pixel(-1, 0), None);
}

#[test]
fn bevel_draws_outline_only() {
    let mut img = Image::new(4, 3).unwrap();
    img.clear(GRAY);
    img.rect_bevel(0, 0, 3, 2, RED, BLUE, BLUE, RED);

    // Top edge except the right corner, which the right edge overwrites.
    assert_eq!(img.get_pixel(1, 0), Some(RED));
    assert_eq!(img.get_pixel(3, 1), Some(BLUE));
    assert_eq!(img.get_pixel(2, 2), Some(BLUE));
    // Left edge drawn last owns both left corners.
    assert_eq!(img.get_pixel(0, 0), Some(RED));
    assert_eq!(img.get_pixel(0, 2), Some(RED));
    // Interior untouched.
    assert_eq!(img.get_pixel(1, 1), Some(GRAY));
    assert_eq!(img.get_pixel(2, 1), Some(GRAY));
}

#[test]
fn fill_rect_clips_to_canvas() {
    let mut img = Image::new(3, 3).unwrap();
    img.fill_rect(2, 2, 5, 5, GREEN);
    assert_eq!(img.get_pixel(2, 2), Some(GREEN));
    assert_eq!(img.get_pixel(1, 2), Some(Rgba8::TRANSPARENT));
}

#[test]
fn oversized_fill_only_walks_the_canvas() {
    let mut img = Image::new(2, 2).unwrap();
    img.fill_rect(0, 0, u32::MAX, u32::MAX, GREEN);
    assert!(img.as_raw().chunks_exact(4).all(|p| p == GREEN.to_array()));

    let mut img = Image::new(2, 2).unwrap();
    img.fill_rect(i32::MIN, -1, u32::MAX, 2, RED);
    assert_eq!(img.get_pixel(1, 0), Some(RED));
    assert_eq!(img.get_pixel(0, 1), Some(Rgba8::TRANSPARENT));

    img.fill_rect(5, 0, u32::MAX, u32::MAX, BLUE);
    img.fill_rect(i32::MIN, i32::MIN, 100, 100, BLUE);
    assert!(!img.as_raw().chunks_exact(4).any(|p| p == BLUE.to_array()));
}

#[test]
fn oversized_bevel_draws_only_visible_edges() {
    let mut img = Image::new(3, 3).unwrap();
    img.clear(GRAY);
    img.rect_bevel(0, 0, i32::MAX, i32::MAX, RED, BLUE, BLUE, GREEN);
    // Right and bottom edges are far off the canvas.
    assert_eq!(img.get_pixel(2, 0), Some(RED));
    assert_eq!(img.get_pixel(0, 2), Some(GREEN));
    assert_eq!(img.get_pixel(0, 0), Some(GREEN));
    assert_eq!(img.get_pixel(2, 2), Some(GRAY));

    let mut img = Image::new(3, 3).unwrap();
    img.clear(GRAY);
    img.rect_bevel(i32::MIN, i32::MIN, i32::MAX, i32::MAX, RED, BLUE, BLUE, GREEN);
    img.rect_bevel(-1, -1, 2, 2, RED, BLUE, BLUE, GREEN);
    // Only the right and bottom edges of the second outline reach the canvas.
    assert_eq!(img.get_pixel(1, 0), Some(BLUE));
    assert_eq!(img.get_pixel(0, 1), Some(BLUE));
    assert_eq!(img.get_pixel(1, 1), Some(BLUE));
    assert_eq!(img.get_pixel(2, 2), Some(GRAY));
}
