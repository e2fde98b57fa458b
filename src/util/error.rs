//! Error types for mockup.

use thiserror::Error;

/// Result alias for mockup operations.
pub type MockupResult<T> = std::result::Result<T, MockupError>;

/// Kind of asset requested from an [`AssetProvider`](crate::assets::AssetProvider).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Opaque garment photograph for one colorway.
    GarmentPhoto,
    /// Guide image encoding the placement region.
    Guide,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::GarmentPhoto => f.write_str("garment photo"),
            AssetKind::Guide => f.write_str("guide"),
        }
    }
}

/// Errors that can occur while building mockups.
///
/// Every variant is local to one (design, garment, colorway) combination;
/// batch callers record it and move on to the next combination.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MockupError {
    /// The guide image has no pixel with alpha below the guide threshold.
    #[error("invalid guide: no pixel with alpha below {threshold}")]
    InvalidGuide { threshold: u8 },
    /// The design image has no pixel with non-zero alpha.
    #[error("empty design: no visible pixel")]
    EmptyDesign,
    /// The placement box or the scaled target has a zero dimension.
    #[error(
        "degenerate box: box {box_w}x{box_h}, target {target_w}x{target_h}"
    )]
    DegenerateBox {
        box_w: u32,
        box_h: u32,
        target_w: u32,
        target_h: u32,
    },
    /// The asset provider has no file for the requested garment/name.
    #[error("{kind} not found: {garment}/{name}")]
    AssetNotFound {
        kind: AssetKind,
        garment: String,
        name: String,
    },
    /// A settings field is outside its allowed range.
    #[error("invalid settings: {field} = {value}")]
    InvalidSettings { field: &'static str, value: String },
    /// The garment is not present in the catalog.
    #[error("unknown garment: {garment}")]
    UnknownGarment { garment: String },
    /// The colorway is not listed for the garment.
    #[error("unknown colorway {colorway} for garment {garment}")]
    UnknownColorway { garment: String, colorway: String },
    /// Image decoding, encoding, or file access failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

impl MockupError {
    /// Builds a [`MockupError::AssetNotFound`].
    pub fn asset_not_found(
        kind: AssetKind,
        garment: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::AssetNotFound {
            kind,
            garment: garment.into(),
            name: name.into(),
        }
    }

    /// Builds an [`MockupError::ImageIo`] from any displayable cause.
    pub fn image_io(reason: impl std::fmt::Display) -> Self {
        Self::ImageIo {
            reason: reason.to_string(),
        }
    }
}
