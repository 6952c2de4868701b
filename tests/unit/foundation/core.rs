use super::*;

#[test]
fn bytes_per_pixel_matches_encoding() {
    assert_eq!(PixelFormat::Rgba.bytes_per_pixel(), 4);
    assert_eq!(PixelFormat::Indexed.bytes_per_pixel(), 1);
}

#[test]
fn buffer_len_overflow_is_an_allocation_error() {
    assert_eq!(buffer_len(3, 2, 4).unwrap(), 24);
    assert_eq!(buffer_len(0, 100, 4).unwrap(), 0);
    assert!(matches!(
        buffer_len(u32::MAX, u32::MAX, usize::MAX),
        Err(PixeloomError::Allocation { .. })
    ));
}

#[test]
fn alloc_helpers_size_exactly() {
    let z = alloc_zeroed(7).unwrap();
    assert_eq!(z, vec![0; 7]);
    let c = alloc_copy(&[1, 2, 3]).unwrap();
    assert_eq!(c, vec![1, 2, 3]);
}

#[test]
fn rgba8_serializes_as_array() {
    let c = Rgba8::new(60, 0, 60, 255);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[60,0,60,255]");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
