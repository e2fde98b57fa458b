//! Guide box detection.
//!
//! A guide image has the same pixel dimensions as its garment photos and marks
//! the printable region with near-transparent pixels. The placement box is the
//! tightest rectangle around every pixel with alpha below [`GUIDE_ALPHA_THRESHOLD`].

use crate::image::alpha_bounds;
use crate::trace::trace_event;
use crate::util::{MockupError, MockupResult};
use image::RgbaImage;

/// Guide pixels with alpha strictly below this value belong to the placement region.
pub const GUIDE_ALPHA_THRESHOLD: u8 = 10;

/// Axis-aligned placement rectangle on a garment photo.
///
/// `x1`/`y1` are the last transparent column and row of the guide, so the box
/// spans `x1 - x0` by `y1 - y0` pixels for fitting and centering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementBox {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PlacementBox {
    /// Creates a box, swapping corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn x0(&self) -> u32 {
        self.x0
    }

    pub fn y0(&self) -> u32 {
        self.y0
    }

    /// Last column of the box.
    pub fn x1(&self) -> u32 {
        self.x1
    }

    /// Last row of the box.
    pub fn y1(&self) -> u32 {
        self.y1
    }

    /// Box width used for fitting (`x1 - x0`).
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Box height used for fitting (`y1 - y0`).
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Derives the placement box from a guide image's alpha channel.
pub fn detect_placement_box(guide: &RgbaImage) -> MockupResult<PlacementBox> {
    let bounds = alpha_bounds(guide, |a| a < GUIDE_ALPHA_THRESHOLD).ok_or(
        MockupError::InvalidGuide {
            threshold: GUIDE_ALPHA_THRESHOLD,
        },
    )?;
    let placement = PlacementBox::new(bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    trace_event!(
        "placement_box",
        x0 = placement.x0(),
        y0 = placement.y0(),
        width = placement.width(),
        height = placement.height()
    );
    Ok(placement)
}
