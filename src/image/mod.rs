//! RGBA pixel helpers shared by the pipeline stages.
//!
//! All images are `image::RgbaImage` (8-bit straight alpha). Bounding boxes
//! returned here are inclusive: `x1`/`y1` name the last matching column/row.

#[cfg(feature = "image-io")]
pub mod io;

use image::RgbaImage;

/// Inclusive bounding box of pixels selected by an alpha predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlphaBounds {
    /// Leftmost matching column.
    pub x0: u32,
    /// Topmost matching row.
    pub y0: u32,
    /// Rightmost matching column.
    pub x1: u32,
    /// Bottommost matching row.
    pub y1: u32,
}

/// Returns the tightest box enclosing every pixel whose alpha satisfies `pred`.
///
/// Returns `None` when no pixel matches.
pub fn alpha_bounds<F>(img: &RgbaImage, pred: F) -> Option<AlphaBounds>
where
    F: Fn(u8) -> bool,
{
    let mut bounds: Option<AlphaBounds> = None;
    for (y, row) in img.rows().enumerate() {
        let y = y as u32;
        let mut row_min = None;
        let mut row_max = 0u32;
        for (x, px) in row.enumerate() {
            if pred(px.0[3]) {
                let x = x as u32;
                row_min.get_or_insert(x);
                row_max = x;
            }
        }
        let Some(row_min) = row_min else {
            continue;
        };
        bounds = Some(match bounds {
            None => AlphaBounds {
                x0: row_min,
                y0: y,
                x1: row_max,
                y1: y,
            },
            Some(b) => AlphaBounds {
                x0: b.x0.min(row_min),
                y0: b.y0,
                x1: b.x1.max(row_max),
                y1: y,
            },
        });
    }
    bounds
}

/// Multiplies RGB by alpha in place (rounded), zeroing fully transparent pixels.
pub(crate) fn premultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u16::from(px.0[3]);
        if a == 0 {
            px.0[0] = 0;
            px.0[1] = 0;
            px.0[2] = 0;
            continue;
        }
        for c in &mut px.0[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

/// Inverse of [`premultiply_in_place`].
pub(crate) fn unpremultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u32::from(px.0[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px.0[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn alpha_bounds_none_for_no_match() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 255]));
        assert_eq!(alpha_bounds(&img, |a| a < 10), None);
    }

    #[test]
    fn alpha_bounds_covers_disjoint_pixels() {
        let mut img = RgbaImage::from_pixel(8, 6, Rgba([0, 0, 0, 0]));
        img.put_pixel(5, 1, Rgba([1, 2, 3, 200]));
        img.put_pixel(2, 4, Rgba([1, 2, 3, 1]));
        let b = alpha_bounds(&img, |a| a > 0).unwrap();
        assert_eq!(
            b,
            AlphaBounds {
                x0: 2,
                y0: 1,
                x1: 5,
                y1: 4
            }
        );
    }

    #[test]
    fn premultiply_roundtrip_preserves_opaque_and_zeroes_transparent() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        img.put_pixel(2, 0, Rgba([200, 100, 50, 128]));
        premultiply_in_place(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
        unpremultiply_in_place(&mut img);
        let half = img.get_pixel(2, 0).0;
        assert!(half[0].abs_diff(200) <= 1);
        assert!(half[1].abs_diff(100) <= 1);
        assert!(half[2].abs_diff(50) <= 1);
    }
}
