//! End-to-end mockup rendering for one combination.
//!
//! `render` runs normalize -> detect -> fit -> recolor -> composite. Callers
//! that render many colorways for the same design and guide can normalize and
//! detect once and call [`render_placed`] per colorway. No stage recovers from
//! an error; it is returned to the caller unchanged.

use crate::composite::composite;
use crate::design::DesignCrop;
use crate::fit::fit_resize;
use crate::placement::{detect_placement_box, PlacementBox};
use crate::recolor::{recolor, ColorMode};
use crate::settings::Settings;
use crate::trace::trace_span;
use crate::util::MockupResult;
use image::{RgbImage, RgbaImage};

/// Renders `design` onto `garment_photo` in the region marked by `guide`.
pub fn render(
    design: &RgbaImage,
    guide: &RgbaImage,
    garment_photo: &RgbaImage,
    settings: &Settings,
    color_mode: ColorMode,
    is_dark_colorway: bool,
) -> MockupResult<RgbImage> {
    let crop = DesignCrop::normalize(design)?;
    render_crop(&crop, guide, garment_photo, settings, color_mode, is_dark_colorway)
}

/// Like [`render`] for a design that is already normalized.
pub fn render_crop(
    crop: &DesignCrop,
    guide: &RgbaImage,
    garment_photo: &RgbaImage,
    settings: &Settings,
    color_mode: ColorMode,
    is_dark_colorway: bool,
) -> MockupResult<RgbImage> {
    let placement = detect_placement_box(guide)?;
    render_placed(
        crop,
        &placement,
        garment_photo,
        settings,
        color_mode,
        is_dark_colorway,
    )
}

/// Fits, recolors, and composites `crop` into an already detected `placement`.
pub fn render_placed(
    crop: &DesignCrop,
    placement: &PlacementBox,
    garment_photo: &RgbaImage,
    settings: &Settings,
    color_mode: ColorMode,
    is_dark_colorway: bool,
) -> MockupResult<RgbImage> {
    let _span = trace_span!(
        "render",
        scale = settings.scale(),
        offset = settings.offset(),
        dark = is_dark_colorway
    )
    .entered();

    let resized = fit_resize(crop, placement, settings.scale())?;
    let layer = recolor(&resized, color_mode, is_dark_colorway);
    Ok(composite(garment_photo, &layer, placement, settings.offset()))
}
