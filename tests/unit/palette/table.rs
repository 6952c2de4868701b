use super::*;

#[test]
fn offset_wraps_modulo_256() {
    let mut pal = Palette::default();
    pal.set_color(0, Rgba8::opaque(9, 8, 7));
    assert_eq!(pal.resolve(255, None, 1), Rgba8::opaque(9, 8, 7));
    assert_eq!(pal.resolve(200, None, 100), pal.color(44));
}

#[test]
fn remap_applies_before_offset() {
    let pal = Palette::default();
    let mut remap = RemapTable::identity();
    remap.set(10, 250);
    // 10 -> 250, then +10 wraps to 4.
    assert_eq!(pal.resolve(10, Some(&remap), 10), pal.color(4));
    assert_eq!(pal.resolve(11, Some(&remap), 0), pal.color(11));
}

#[test]
fn remap_from_slice_requires_256_entries() {
    assert!(RemapTable::from_slice(&[0u8; 255]).is_err());
    assert!(RemapTable::from_slice(&[0u8; 257]).is_err());
    let t = RemapTable::from_slice(&[3u8; 256]).unwrap();
    assert_eq!(t.get(77), 3);
}

#[test]
fn rgb_bytes_length_is_validated() {
    assert!(Palette::from_rgb_bytes(&[0u8; 767]).is_err());
    let mut rgb = vec![0u8; 768];
    rgb[3..6].copy_from_slice(&[1, 2, 3]);
    let pal = Palette::from_rgb_bytes(&rgb).unwrap();
    assert_eq!(pal.color(1), Rgba8::opaque(1, 2, 3));
}

#[test]
fn vga_components_expand_to_full_range() {
    let mut rgb = vec![0u8; 768];
    rgb[0..3].copy_from_slice(&[63, 32, 0]);
    let pal = Palette::from_vga_6bit(&rgb).unwrap();
    assert_eq!(pal.color(0), Rgba8::opaque(255, 130, 0));

    rgb[5] = 64;
    assert!(Palette::from_vga_6bit(&rgb).is_err());
}

#[test]
fn remaps_are_reachable_by_slot() {
    let pal = Palette::default().with_remaps(vec![RemapTable::identity(), RemapTable::default()]);
    assert_eq!(pal.remap_count(), 2);
    assert!(pal.remap(1).is_some());
    assert!(pal.remap(2).is_none());
}
