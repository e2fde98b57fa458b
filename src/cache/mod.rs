//! Explicitly refreshed preview cache.
//!
//! Rendering decodes and resamples several images, so previews are recomputed
//! only when an entry is missing or the caller asks for a refresh. Edited
//! settings do not touch a cached preview until then; [`PreviewCache::is_stale`]
//! lets the caller detect that situation.

use crate::recolor::ColorMode;
use crate::settings::Settings;
use crate::util::MockupResult;
use image::RgbImage;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Identifies one rendered preview.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewKey {
    pub design: String,
    pub garment: String,
    pub colorway: String,
}

impl PreviewKey {
    pub fn new(
        design: impl Into<String>,
        garment: impl Into<String>,
        colorway: impl Into<String>,
    ) -> Self {
        Self {
            design: design.into(),
            garment: garment.into(),
            colorway: colorway.into(),
        }
    }
}

struct CachedPreview {
    settings: Settings,
    color_mode: ColorMode,
    image: RgbImage,
}

/// Rendered previews keyed by (design, garment, colorway).
#[derive(Default)]
pub struct PreviewCache {
    entries: HashMap<PreviewKey, CachedPreview>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached preview, if any.
    pub fn get(&self, key: &PreviewKey) -> Option<&RgbImage> {
        self.entries.get(key).map(|entry| &entry.image)
    }

    /// Whether `key` was rendered with different inputs than `settings`/`color_mode`.
    ///
    /// Missing entries count as stale.
    pub fn is_stale(&self, key: &PreviewKey, settings: &Settings, color_mode: ColorMode) -> bool {
        match self.entries.get(key) {
            Some(entry) => entry.settings != *settings || entry.color_mode != color_mode,
            None => true,
        }
    }

    /// Returns the cached preview, rendering it when absent or when `refresh` is set.
    ///
    /// A failed render leaves any previous entry in place and returns the error.
    pub fn get_or_render<F>(
        &mut self,
        key: PreviewKey,
        settings: &Settings,
        color_mode: ColorMode,
        refresh: bool,
        render: F,
    ) -> MockupResult<&RgbImage>
    where
        F: FnOnce() -> MockupResult<RgbImage>,
    {
        let cached = |image| CachedPreview {
            settings: settings.clone(),
            color_mode,
            image,
        };
        let slot = match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if refresh {
                    occupied.insert(cached(render()?));
                }
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(cached(render()?)),
        };
        Ok(&slot.image)
    }

    /// Drops every entry for `design`.
    pub fn invalidate_design(&mut self, design: &str) {
        self.entries.retain(|key, _| key.design != design);
    }

    /// Drops a single entry, returning whether it existed.
    pub fn invalidate(&mut self, key: &PreviewKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
