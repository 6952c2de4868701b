//! Per-pixel blend math for the CPU sink. Framebuffer pixels are premultiplied RGBA8; surface
//! pixels arrive straight.

use crate::render::sink::BlendMode;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiply a straight RGBA8 pixel.
pub fn premul(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

/// Undo [`premul`]. Fully transparent pixels come back as transparent black.
pub fn unpremul(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

/// Source-over of a premultiplied `src` onto a premultiplied `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Combine one straight source pixel into a premultiplied framebuffer pixel.
///
/// `Opaque` ignores source alpha and replaces the destination; `Alpha` is source-over.
pub fn blend_pixel(dst: PremulRgba8, src: [u8; 4], mode: BlendMode) -> PremulRgba8 {
    match mode {
        BlendMode::Opaque => [src[0], src[1], src[2], 255],
        BlendMode::Alpha => over(dst, premul(src)),
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
