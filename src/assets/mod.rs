//! Garment photo and guide lookup.
//!
//! Photos are addressed by (garment, colorway) and guides by (garment, guide
//! name). A missing entry is [`MockupError::AssetNotFound`]; it fails only the
//! combinations that need it.

#[cfg(feature = "image-io")]
mod dir;

#[cfg(feature = "image-io")]
pub use dir::DirAssets;

use crate::util::{AssetKind, MockupError, MockupResult};
use image::RgbaImage;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Source of garment photos and guide images.
///
/// Implementations are shared across worker threads during parallel export.
pub trait AssetProvider: Sync {
    /// Opaque base photo of `garment` in `colorway`.
    fn garment_photo(&self, garment: &str, colorway: &str) -> MockupResult<Arc<RgbaImage>>;

    /// Guide image `guide` for `garment`.
    fn guide(&self, garment: &str, guide: &str) -> MockupResult<Arc<RgbaImage>>;

    /// Guide names available for `garment`, sorted.
    fn guides(&self, garment: &str) -> MockupResult<Vec<String>>;
}

/// In-memory asset table.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    photos: HashMap<(String, String), Arc<RgbaImage>>,
    guides: BTreeMap<(String, String), Arc<RgbaImage>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the photo for `garment`/`colorway`, replacing any previous one.
    pub fn insert_photo(
        &mut self,
        garment: impl Into<String>,
        colorway: impl Into<String>,
        img: RgbaImage,
    ) {
        self.photos
            .insert((garment.into(), colorway.into()), Arc::new(img));
    }

    /// Registers guide `guide` for `garment`, replacing any previous one.
    pub fn insert_guide(
        &mut self,
        garment: impl Into<String>,
        guide: impl Into<String>,
        img: RgbaImage,
    ) {
        self.guides.insert((garment.into(), guide.into()), Arc::new(img));
    }

    /// Builder form of [`insert_photo`](Self::insert_photo).
    pub fn with_photo(mut self, garment: &str, colorway: &str, img: RgbaImage) -> Self {
        self.insert_photo(garment, colorway, img);
        self
    }

    /// Builder form of [`insert_guide`](Self::insert_guide).
    pub fn with_guide(mut self, garment: &str, guide: &str, img: RgbaImage) -> Self {
        self.insert_guide(garment, guide, img);
        self
    }
}

impl AssetProvider for MemoryAssets {
    fn garment_photo(&self, garment: &str, colorway: &str) -> MockupResult<Arc<RgbaImage>> {
        self.photos
            .get(&(garment.to_string(), colorway.to_string()))
            .cloned()
            .ok_or_else(|| MockupError::asset_not_found(AssetKind::GarmentPhoto, garment, colorway))
    }

    fn guide(&self, garment: &str, guide: &str) -> MockupResult<Arc<RgbaImage>> {
        self.guides
            .get(&(garment.to_string(), guide.to_string()))
            .cloned()
            .ok_or_else(|| MockupError::asset_not_found(AssetKind::Guide, garment, guide))
    }

    fn guides(&self, garment: &str) -> MockupResult<Vec<String>> {
        Ok(self
            .guides
            .keys()
            .filter(|(g, _)| g == garment)
            .map(|(_, name)| name.clone())
            .collect())
    }
}
