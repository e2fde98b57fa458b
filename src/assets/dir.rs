//! Directory-backed assets.
//!
//! Layout under the root:
//!
//! ```text
//! {root}/{garment}/{COLORWAY}.jpg
//! {root}/guides/{garment}/{GUIDE}.png
//! ```

use crate::assets::AssetProvider;
use crate::image::io::load_rgba;
use crate::util::{AssetKind, MockupError, MockupResult};
use image::RgbaImage;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

type DecodedCache = Mutex<HashMap<PathBuf, Arc<RgbaImage>>>;

/// Assets read from a directory tree.
///
/// Guides are decoded once and kept in memory. Garment photos are decoded on
/// every request unless [`DirAssets::with_photo_cache`] is enabled.
pub struct DirAssets {
    root: PathBuf,
    cache_photos: bool,
    decoded: DecodedCache,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache_photos: false,
            decoded: Mutex::new(HashMap::new()),
        }
    }

    /// Keeps decoded garment photos in memory for the lifetime of `self`.
    pub fn with_photo_cache(mut self, enabled: bool) -> Self {
        self.cache_photos = enabled;
        self
    }

    /// Number of decoded images currently held in memory.
    pub fn cached_len(&self) -> usize {
        self.decoded.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// Root directory of the asset tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the photo for `garment`/`colorway`.
    pub fn photo_path(&self, garment: &str, colorway: &str) -> PathBuf {
        self.root.join(garment).join(format!("{colorway}.jpg"))
    }

    /// Path of guide `guide` for `garment`.
    pub fn guide_path(&self, garment: &str, guide: &str) -> PathBuf {
        self.guides_dir(garment).join(format!("{guide}.png"))
    }

    fn guides_dir(&self, garment: &str) -> PathBuf {
        self.root.join("guides").join(garment)
    }

    fn load(
        &self,
        path: PathBuf,
        kind: AssetKind,
        garment: &str,
        name: &str,
    ) -> MockupResult<Arc<RgbaImage>> {
        let keep = match kind {
            AssetKind::GarmentPhoto => self.cache_photos,
            AssetKind::Guide => true,
        };
        if let Some(hit) = self.cached(&path) {
            return Ok(hit);
        }
        if !path.is_file() {
            return Err(MockupError::asset_not_found(kind, garment, name));
        }
        let img = Arc::new(load_rgba(&path)?);
        if keep {
            if let Ok(mut decoded) = self.decoded.lock() {
                decoded.insert(path, Arc::clone(&img));
            }
        }
        Ok(img)
    }

    fn cached(&self, path: &Path) -> Option<Arc<RgbaImage>> {
        let decoded = self.decoded.lock().ok()?;
        decoded.get(path).cloned()
    }
}

impl AssetProvider for DirAssets {
    fn garment_photo(&self, garment: &str, colorway: &str) -> MockupResult<Arc<RgbaImage>> {
        self.load(
            self.photo_path(garment, colorway),
            AssetKind::GarmentPhoto,
            garment,
            colorway,
        )
    }

    fn guide(&self, garment: &str, guide: &str) -> MockupResult<Arc<RgbaImage>> {
        self.load(self.guide_path(garment, guide), AssetKind::Guide, garment, guide)
    }

    fn guides(&self, garment: &str) -> MockupResult<Vec<String>> {
        let dir = self.guides_dir(garment);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(MockupError::asset_not_found(AssetKind::Guide, garment, "*"));
            }
            Err(err) => return Err(MockupError::image_io(err)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(MockupError::image_io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|f| f.to_str()) {
                if let Some(stem) = name.split('.').next().filter(|s| !s.is_empty()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
