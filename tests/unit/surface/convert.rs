use super::*;
use crate::foundation::core::Rgba8;

fn ramp_palette() -> Palette {
    let mut pal = Palette::default();
    for i in 0..=255u8 {
        pal.set_color(i, Rgba8::new(i, 255 - i, i / 2, 17));
    }
    pal
}

#[test]
fn converts_each_pixel_through_palette() {
    let pal = ramp_palette();
    let s = Surface::from_indexed(3, 1, &[0, 10, 255], None).unwrap();
    let out = s.to_rgba_vec(&pal, None, 0).unwrap();
    assert_eq!(
        out,
        vec![0, 255, 0, 255, 10, 245, 5, 255, 255, 0, 127, 255]
    );
}

#[test]
fn index_255_with_offset_1_resolves_to_entry_0() {
    let pal = ramp_palette();
    let s = Surface::from_indexed(1, 1, &[255], None).unwrap();
    let out = s.to_rgba_vec(&pal, None, 1).unwrap();
    let c0 = pal.color(0);
    assert_eq!(out, vec![c0.r, c0.g, c0.b, 255]);
}

#[test]
fn masked_pixels_have_zero_alpha_regardless_of_index() {
    let pal = ramp_palette();
    let index: Vec<u8> = (0..=255).collect();
    let stencil: Vec<u8> = (0..256).map(|i| u8::from(i % 3 != 0)).collect();
    let s = Surface::from_indexed(16, 16, &index, Some(&stencil)).unwrap();
    for offset in [0u8, 1, 128, 255] {
        let out = s.to_rgba_vec(&pal, None, offset).unwrap();
        for (i, px) in out.chunks_exact(4).enumerate() {
            let expected_alpha = if i % 3 == 0 { 0 } else { 255 };
            assert_eq!(px[3], expected_alpha, "pixel {i} offset {offset}");
        }
    }
}

#[test]
fn remap_is_applied_before_offset() {
    let pal = ramp_palette();
    let mut remap = RemapTable::identity();
    remap.set(1, 200);
    let s = Surface::from_indexed(2, 1, &[1, 2], None).unwrap();
    let out = s.to_rgba_vec(&pal, Some(&remap), 100).unwrap();
    let a = pal.color(44); // 200 + 100 wraps
    let b = pal.color(102);
    assert_eq!(&out[0..3], &[a.r, a.g, a.b]);
    assert_eq!(&out[4..7], &[b.r, b.g, b.b]);
}

#[test]
fn conversion_is_deterministic() {
    let pal = ramp_palette();
    let mut remap = RemapTable::identity();
    remap.set(7, 3);
    let index: Vec<u8> = (0..64u32).map(|i| (i * 37 % 256) as u8).collect();
    let stencil: Vec<u8> = (0..64u32).map(|i| (i % 2) as u8).collect();
    let s = Surface::from_indexed(8, 8, &index, Some(&stencil)).unwrap();

    let a = s.to_rgba_vec(&pal, Some(&remap), 9).unwrap();
    let mut b = vec![0xAA; 8 * 8 * 4];
    s.to_rgba_into(&mut b, &pal, Some(&remap), 9).unwrap();
    assert_eq!(a, b);
}

#[test]
fn into_buffer_leaves_source_untouched_and_checks_length() {
    let pal = ramp_palette();
    let s = Surface::from_indexed(2, 2, &[1, 2, 3, 4], None).unwrap();
    let mut short = vec![0u8; 15];
    assert!(matches!(
        s.to_rgba_into(&mut short, &pal, None, 0),
        Err(PixeloomError::Validation(_))
    ));
    let mut dst = vec![0u8; 16];
    s.to_rgba_into(&mut dst, &pal, None, 0).unwrap();
    assert_eq!(s.format(), PixelFormat::Indexed);
    assert_eq!(s.index(), Some(&[1u8, 2, 3, 4][..]));
}

#[test]
fn in_place_conversion_flips_tag_and_keeps_id() {
    let pal = ramp_palette();
    let mut s = Surface::from_indexed(2, 1, &[4, 5], Some(&[1, 0])).unwrap();
    let id = s.id();
    s.convert_to_rgba(&pal, 2).unwrap();
    assert_eq!(s.format(), PixelFormat::Rgba);
    assert_eq!(s.id(), id);
    assert_eq!(s.stencil(), None);
    let (c6, c7) = (pal.color(6), pal.color(7));
    assert_eq!(
        s.rgba().unwrap(),
        &[c6.r, c6.g, c6.b, 255, c7.r, c7.g, c7.b, 0]
    );
}

#[test]
fn converting_rgba_surface_is_rejected() {
    let pal = Palette::default();
    let mut s = Surface::new(PixelFormat::Rgba, 1, 1).unwrap();
    let err = s.convert_to_rgba(&pal, 0).unwrap_err();
    assert!(matches!(
        err,
        PixeloomError::EncodingMismatch {
            expected: PixelFormat::Indexed,
            found: PixelFormat::Rgba
        }
    ));
    assert_eq!(s.rgba().map(<[u8]>::len), Some(4));
}

#[test]
fn zero_area_conversion_produces_empty_output() {
    let pal = Palette::default();
    let s = Surface::new(PixelFormat::Indexed, 0, 4).unwrap();
    assert!(s.to_rgba_vec(&pal, None, 0).unwrap().is_empty());
}
