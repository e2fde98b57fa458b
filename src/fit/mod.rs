//! Aspect-preserving resize of a normalized design into a placement box.
//!
//! The scaled target is `floor(box * scale / 100)` on each axis. The design is
//! compared against the target's aspect ratio: a relatively wider design is
//! pinned to the target width, otherwise to the target height. The other side
//! is derived from the design aspect and truncated, so the result always fits
//! inside the target and touches it on the limiting axis.

use crate::design::DesignCrop;
use crate::image::{premultiply_in_place, unpremultiply_in_place};
use crate::placement::PlacementBox;
use crate::settings::SCALE_RANGE;
use crate::trace::trace_event;
use crate::util::math::scale_percent;
use crate::util::{MockupError, MockupResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Output of the fit computation for one design/box/scale triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitPlan {
    /// Scaled target width.
    pub target_w: u32,
    /// Scaled target height.
    pub target_h: u32,
    /// Resized design width.
    pub new_w: u32,
    /// Resized design height.
    pub new_h: u32,
}

impl FitPlan {
    /// Computes resized dimensions for a `src_w x src_h` design.
    ///
    /// `scale_pct` must lie in [`SCALE_RANGE`].
    pub fn compute(
        src_w: u32,
        src_h: u32,
        box_w: u32,
        box_h: u32,
        scale_pct: u32,
    ) -> MockupResult<Self> {
        if !SCALE_RANGE.contains(&scale_pct) {
            return Err(MockupError::InvalidSettings {
                field: "scale",
                value: scale_pct.to_string(),
            });
        }
        let target_w = scale_percent(box_w, scale_pct);
        let target_h = scale_percent(box_h, scale_pct);
        let degenerate = MockupError::DegenerateBox {
            box_w,
            box_h,
            target_w,
            target_h,
        };
        if box_h == 0 || target_h == 0 || src_w == 0 || src_h == 0 {
            return Err(degenerate);
        }

        let aspect = f64::from(src_w) / f64::from(src_h);
        let target_aspect = f64::from(target_w) / f64::from(target_h);
        let (new_w, new_h) = if aspect > target_aspect {
            (target_w, (f64::from(target_w) / aspect) as u32)
        } else {
            ((f64::from(target_h) * aspect) as u32, target_h)
        };
        if new_w == 0 || new_h == 0 {
            return Err(degenerate);
        }

        Ok(Self {
            target_w,
            target_h,
            new_w: new_w.min(target_w),
            new_h: new_h.min(target_h),
        })
    }

    /// Computes the plan for a crop inside a placement box.
    pub fn for_box(
        crop: &DesignCrop,
        placement: &PlacementBox,
        scale_pct: u32,
    ) -> MockupResult<Self> {
        Self::compute(
            crop.width(),
            crop.height(),
            placement.width(),
            placement.height(),
            scale_pct,
        )
    }
}

/// Resizes `crop` to the plan's dimensions with Lanczos resampling.
///
/// Resampling runs on premultiplied pixels so colours under transparent
/// regions do not bleed into the design edge.
pub fn resize_to_plan(crop: &DesignCrop, plan: &FitPlan) -> RgbaImage {
    let mut src = crop.image().clone();
    premultiply_in_place(&mut src);
    let mut resized = imageops::resize(&src, plan.new_w, plan.new_h, FilterType::Lanczos3);
    unpremultiply_in_place(&mut resized);
    resized
}

/// Fits `crop` inside `placement` at `scale_pct` percent.
pub fn fit_resize(
    crop: &DesignCrop,
    placement: &PlacementBox,
    scale_pct: u32,
) -> MockupResult<RgbaImage> {
    let plan = FitPlan::for_box(crop, placement, scale_pct)?;
    trace_event!(
        "fit_plan",
        target_w = plan.target_w,
        target_h = plan.target_h,
        new_w = plan.new_w,
        new_h = plan.new_h
    );
    Ok(resize_to_plan(crop, &plan))
}
