//! Design normalization: trims a design to its visible pixels.

use crate::image::alpha_bounds;
use crate::util::{MockupError, MockupResult};
use image::{imageops, RgbaImage};

/// A design image cropped to the bounding box of its non-transparent pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignCrop {
    img: RgbaImage,
}

impl DesignCrop {
    /// Crops `design` to the bounds of its pixels with non-zero alpha.
    pub fn normalize(design: &RgbaImage) -> MockupResult<Self> {
        let b = alpha_bounds(design, |a| a > 0).ok_or(MockupError::EmptyDesign)?;
        let img = imageops::crop_imm(design, b.x0, b.y0, b.x1 - b.x0 + 1, b.y1 - b.y0 + 1)
            .to_image();
        Ok(Self { img })
    }

    /// Returns the cropped width in pixels.
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    /// Returns the cropped height in pixels.
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Returns the cropped pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Consumes the crop and returns its pixels.
    pub fn into_image(self) -> RgbaImage {
        self.img
    }
}

/// Shorthand for [`DesignCrop::normalize`].
pub fn normalize_design(design: &RgbaImage) -> MockupResult<DesignCrop> {
    DesignCrop::normalize(design)
}
