//! Silhouette recoloring.
//!
//! Every mode except [`ColorMode::Unchanged`] replaces the design's RGB with a
//! single fill colour and copies the alpha channel verbatim, so the result is
//! the design's silhouette in that colour.

use crate::util::{MockupError, MockupResult};
use image::{Rgb, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed hues offered alongside black/white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedHue {
    BloodRed,
    GoldenOrange,
    RoyalBlue,
    ForestGreen,
}

impl NamedHue {
    /// All hues in menu order.
    pub const ALL: [NamedHue; 4] = [
        NamedHue::BloodRed,
        NamedHue::GoldenOrange,
        NamedHue::RoyalBlue,
        NamedHue::ForestGreen,
    ];

    /// RGB triple for the hue.
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            NamedHue::BloodRed => Rgb([0x78, 0x06, 0x06]),
            NamedHue::GoldenOrange => Rgb([0xFF, 0xA5, 0x00]),
            NamedHue::RoyalBlue => Rgb([0x41, 0x69, 0xE1]),
            NamedHue::ForestGreen => Rgb([0x22, 0x8B, 0x22]),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            NamedHue::BloodRed => "Blood Red",
            NamedHue::GoldenOrange => "Golden Orange",
            NamedHue::RoyalBlue => "Royal Blue",
            NamedHue::ForestGreen => "Forest Green",
        }
    }

    fn key(self) -> &'static str {
        match self {
            NamedHue::BloodRed => "blood_red",
            NamedHue::GoldenOrange => "golden_orange",
            NamedHue::RoyalBlue => "royal_blue",
            NamedHue::ForestGreen => "forest_green",
        }
    }
}

/// Colour treatment applied to every design in a preview or export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Keep the design's own colours.
    Unchanged,
    /// White on dark colorways, black on the rest.
    #[default]
    StandardBw,
    /// A fixed hue regardless of colorway.
    Hue(NamedHue),
}

impl ColorMode {
    /// Fill colour for a colorway, or `None` when the design passes through.
    pub fn fill(self, is_dark_colorway: bool) -> Option<Rgb<u8>> {
        match self {
            ColorMode::Unchanged => None,
            ColorMode::StandardBw if is_dark_colorway => Some(Rgb([255, 255, 255])),
            ColorMode::StandardBw => Some(Rgb([0, 0, 0])),
            ColorMode::Hue(hue) => Some(hue.rgb()),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Unchanged => "Unchanged",
            ColorMode::StandardBw => "Standard (Black/White)",
            ColorMode::Hue(hue) => hue.label(),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Unchanged => f.write_str("unchanged"),
            ColorMode::StandardBw => f.write_str("standard_bw"),
            ColorMode::Hue(hue) => f.write_str(hue.key()),
        }
    }
}

impl FromStr for ColorMode {
    type Err = MockupError;

    /// Accepts snake_case keys (`standard_bw`, `royal_blue`) and menu labels.
    fn from_str(s: &str) -> MockupResult<Self> {
        let trimmed = s.trim();
        let all = [ColorMode::Unchanged, ColorMode::StandardBw]
            .into_iter()
            .chain(NamedHue::ALL.into_iter().map(ColorMode::Hue));
        for mode in all {
            if trimmed.eq_ignore_ascii_case(&mode.to_string())
                || trimmed.eq_ignore_ascii_case(mode.label())
            {
                return Ok(mode);
            }
        }
        Err(MockupError::InvalidSettings {
            field: "color_mode",
            value: s.to_string(),
        })
    }
}

/// Produces the layer to composite for `resized` under `mode`.
///
/// `Unchanged` returns a copy of `resized`. Other modes return a solid fill
/// with `resized`'s alpha channel.
pub fn recolor(resized: &RgbaImage, mode: ColorMode, is_dark_colorway: bool) -> RgbaImage {
    match mode.fill(is_dark_colorway) {
        None => resized.clone(),
        Some(fill) => fill_silhouette(resized, fill),
    }
}

/// Solid `fill` image carrying `mask`'s alpha channel pixel for pixel.
pub fn fill_silhouette(mask: &RgbaImage, fill: Rgb<u8>) -> RgbaImage {
    let [r, g, b] = fill.0;
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        Rgba([r, g, b, mask.get_pixel(x, y).0[3]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_matches_mode_and_darkness() {
        assert_eq!(ColorMode::Unchanged.fill(true), None);
        assert_eq!(ColorMode::StandardBw.fill(true), Some(Rgb([255, 255, 255])));
        assert_eq!(ColorMode::StandardBw.fill(false), Some(Rgb([0, 0, 0])));
        let royal = ColorMode::Hue(NamedHue::RoyalBlue);
        assert_eq!(royal.fill(true), royal.fill(false));
        assert_eq!(royal.fill(false), Some(Rgb([65, 105, 225])));
    }

    #[test]
    fn parse_accepts_keys_and_labels() {
        assert_eq!("standard_bw".parse::<ColorMode>().unwrap(), ColorMode::StandardBw);
        assert_eq!(
            "Standard (Black/White)".parse::<ColorMode>().unwrap(),
            ColorMode::StandardBw
        );
        assert_eq!(
            "Blood Red".parse::<ColorMode>().unwrap(),
            ColorMode::Hue(NamedHue::BloodRed)
        );
        assert_eq!("UNCHANGED".parse::<ColorMode>().unwrap(), ColorMode::Unchanged);
        assert!("magenta".parse::<ColorMode>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for hue in NamedHue::ALL {
            let mode = ColorMode::Hue(hue);
            assert_eq!(mode.to_string().parse::<ColorMode>().unwrap(), mode);
        }
    }
}
