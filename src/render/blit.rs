use kurbo::Rect;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::SurfaceSize;
use crate::render::surface::Surface;

/// Fraction of the surface the intro frames may occupy.
pub const INTRO_FIT_FRACTION: f64 = 0.8;

/// Compute the centered destination rectangle for an image constrained to
/// `max_fraction` of the surface in both axes.
///
/// Downscale only: an image already inside the box keeps its natural size.
/// Each axis is clamped in turn with the other scaled proportionally, so the
/// clamped axis lands exactly on the box edge and aspect ratio is preserved.
pub fn fit_rect(image_w: u32, image_h: u32, surface: SurfaceSize, max_fraction: f64) -> Rect {
    let max_w = f64::from(surface.width) * max_fraction;
    let max_h = f64::from(surface.height) * max_fraction;

    let mut w = f64::from(image_w);
    let mut h = f64::from(image_h);
    if w > max_w {
        h *= max_w / w;
        w = max_w;
    }
    if h > max_h {
        w *= max_h / h;
        h = max_h;
    }

    let x = (f64::from(surface.width) - w) / 2.0;
    let y = (f64::from(surface.height) - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

/// Draw `image` into `dest` on the surface with nearest-neighbor sampling and
/// premultiplied source-over compositing.
///
/// The destination is clipped to the surface; degenerate rectangles draw
/// nothing.
pub fn blit_scaled(surface: &mut Surface, image: &PreparedImage, dest: Rect) {
    let size = surface.size();
    if dest.width() <= 0.0 || dest.height() <= 0.0 {
        return;
    }

    let x0 = dest.x0.round().max(0.0) as u32;
    let y0 = dest.y0.round().max(0.0) as u32;
    let x1 = (dest.x1.round() as i64).clamp(0, i64::from(size.width)) as u32;
    let y1 = (dest.y1.round() as i64).clamp(0, i64::from(size.height)) as u32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_w = f64::from(image.width());
    let src_h = f64::from(image.height());
    let src = image.rgba8_premul();
    let stride = size.width as usize * 4;
    let dst = surface.rgba8_premul_mut();

    for py in y0..y1 {
        // Sample at destination pixel centers mapped back into source space.
        let v = (f64::from(py) + 0.5 - dest.y0) / dest.height() * src_h;
        let sy = (v.floor() as i64).clamp(0, image.height() as i64 - 1) as usize;
        let src_row = &src[sy * image.width() as usize * 4..][..image.width() as usize * 4];
        let dst_row = &mut dst[py as usize * stride..][..stride];

        for px in x0..x1 {
            let u = (f64::from(px) + 0.5 - dest.x0) / dest.width() * src_w;
            let sx = (u.floor() as i64).clamp(0, image.width() as i64 - 1) as usize;
            let s: [u8; 4] = src_row[sx * 4..sx * 4 + 4].try_into().unwrap_or([0; 4]);
            if s[3] == 0 {
                continue;
            }
            let d = &mut dst_row[px as usize * 4..px as usize * 4 + 4];
            let out = over_premul([d[0], d[1], d[2], d[3]], s);
            d.copy_from_slice(&out);
        }
    }
}

fn over_premul(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = u16::from(src[i])
            .saturating_add(mul_div255(u16::from(dst[i]), inv))
            .min(255) as u8;
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}
