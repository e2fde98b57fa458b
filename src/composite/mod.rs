//! Positional compositing of a recolored layer onto a garment photo.

use crate::placement::PlacementBox;
use crate::util::math::center_offset;
use image::{Rgb, RgbImage, RgbaImage};

/// Top-left paste position of a `width x height` layer inside `placement`.
///
/// The layer is centered in the box (floor division) and then shifted down
/// by `offset_y`. The result may lie outside the box or the photo.
pub fn paste_position(
    placement: &PlacementBox,
    width: u32,
    height: u32,
    offset_y: i32,
) -> (i64, i64) {
    let px = i64::from(placement.x0()) + center_offset(placement.width(), width);
    let py = i64::from(placement.y0())
        + center_offset(placement.height(), height)
        + i64::from(offset_y);
    (px, py)
}

/// Blends `layer` over `base` at `(px, py)` using the layer's alpha as the mask.
///
/// Pixels of the layer that fall outside `base` are clipped. `base` is
/// treated as opaque; its alpha channel is dropped.
pub fn paste_over(base: &RgbaImage, layer: &RgbaImage, px: i64, py: i64) -> RgbImage {
    let mut out = RgbImage::from_fn(base.width(), base.height(), |x, y| {
        let [r, g, b, _] = base.get_pixel(x, y).0;
        Rgb([r, g, b])
    });

    let x_start = px.max(0);
    let y_start = py.max(0);
    let x_end = (px + i64::from(layer.width())).min(i64::from(base.width()));
    let y_end = (py + i64::from(layer.height())).min(i64::from(base.height()));

    for y in y_start..y_end {
        for x in x_start..x_end {
            let src = layer.get_pixel((x - px) as u32, (y - py) as u32).0;
            let alpha = u32::from(src[3]);
            if alpha == 0 {
                continue;
            }
            let dst = out.get_pixel_mut(x as u32, y as u32);
            if alpha == 255 {
                dst.0 = [src[0], src[1], src[2]];
                continue;
            }
            let inv = 255 - alpha;
            for (d, s) in dst.0.iter_mut().zip(src) {
                *d = ((u32::from(s) * alpha + u32::from(*d) * inv + 127) / 255) as u8;
            }
        }
    }
    out
}

/// Composites `layer` centered in `placement` (plus `offset_y`) on a copy of `base`.
pub fn composite(
    base: &RgbaImage,
    layer: &RgbaImage,
    placement: &PlacementBox,
    offset_y: i32,
) -> RgbImage {
    let (px, py) = paste_position(placement, layer.width(), layer.height(), offset_y);
    paste_over(base, layer, px, py)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn position_centers_with_floor_and_offset() {
        let placement = PlacementBox::new(100, 100, 300, 300);
        assert_eq!(paste_position(&placement, 200, 200, 0), (100, 100));
        assert_eq!(paste_position(&placement, 101, 50, -20), (149, 155));
    }

    #[test]
    fn half_alpha_blends_and_zero_alpha_keeps_base() {
        let base = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        let mut layer = RgbaImage::new(2, 1);
        layer.put_pixel(0, 0, Rgba([255, 255, 255, 128]));
        layer.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        let out = paste_over(&base, &layer, 0, 0);
        assert_eq!(out.get_pixel(0, 0).0, [128, 128, 128]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn layer_outside_base_is_clipped() {
        let base = RgbaImage::from_pixel(4, 4, Rgba([10, 10, 10, 255]));
        let layer = RgbaImage::from_pixel(3, 3, Rgba([200, 0, 0, 255]));
        let out = paste_over(&base, &layer, -2, 3);
        assert_eq!(out.get_pixel(0, 3).0, [200, 0, 0]);
        assert_eq!(out.get_pixel(1, 3).0, [10, 10, 10]);
        assert_eq!(out.get_pixel(0, 2).0, [10, 10, 10]);

        let off = paste_over(&base, &layer, 10, 10);
        assert!(off.pixels().all(|p| p.0 == [10, 10, 10]));
    }
}
