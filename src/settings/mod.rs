//! Per-combination placement settings and the session store that owns them.
//!
//! The pipeline only ever receives a resolved [`Settings`] value; the store is
//! for callers that keep user edits between renders.

use crate::util::{MockupError, MockupResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Allowed scale percentages.
pub const SCALE_RANGE: RangeInclusive<u32> = 50..=100;
/// Allowed vertical offsets in pixels.
pub const OFFSET_RANGE: RangeInclusive<i32> = -100..=100;
/// Guide selected for combinations that have not been edited.
pub const DEFAULT_GUIDE: &str = "STANDARD";

/// Placement parameters for one (design, garment) combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SettingsRepr", into = "SettingsRepr")]
pub struct Settings {
    guide: String,
    scale: u32,
    offset: i32,
}

impl Settings {
    /// Creates validated settings.
    pub fn new(guide: impl Into<String>, scale: u32, offset: i32) -> MockupResult<Self> {
        let guide = guide.into();
        if guide.trim().is_empty() {
            return Err(MockupError::InvalidSettings {
                field: "guide",
                value: guide,
            });
        }
        if !SCALE_RANGE.contains(&scale) {
            return Err(MockupError::InvalidSettings {
                field: "scale",
                value: scale.to_string(),
            });
        }
        if !OFFSET_RANGE.contains(&offset) {
            return Err(MockupError::InvalidSettings {
                field: "offset",
                value: offset.to_string(),
            });
        }
        Ok(Self {
            guide,
            scale,
            offset,
        })
    }

    /// Guide identifier.
    pub fn guide(&self) -> &str {
        &self.guide
    }

    /// Scale percent within the placement box.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Vertical offset in pixels (positive moves down).
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Returns a copy with a different guide.
    pub fn with_guide(&self, guide: impl Into<String>) -> MockupResult<Self> {
        Self::new(guide, self.scale, self.offset)
    }

    /// Returns a copy with a different scale.
    pub fn with_scale(&self, scale: u32) -> MockupResult<Self> {
        Self::new(self.guide.clone(), scale, self.offset)
    }

    /// Returns a copy with a different offset.
    pub fn with_offset(&self, offset: i32) -> MockupResult<Self> {
        Self::new(self.guide.clone(), self.scale, offset)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guide: DEFAULT_GUIDE.to_string(),
            scale: *SCALE_RANGE.end(),
            offset: 0,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct SettingsRepr {
    guide: String,
    scale: u32,
    offset: i32,
}

impl Default for SettingsRepr {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl From<Settings> for SettingsRepr {
    fn from(value: Settings) -> Self {
        Self {
            guide: value.guide,
            scale: value.scale,
            offset: value.offset,
        }
    }
}

impl TryFrom<SettingsRepr> for Settings {
    type Error = MockupError;

    fn try_from(value: SettingsRepr) -> MockupResult<Self> {
        Settings::new(value.guide, value.scale, value.offset)
    }
}

/// Identifies one (design, garment) combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComboKey {
    pub design: String,
    pub garment: String,
}

impl ComboKey {
    pub fn new(design: impl Into<String>, garment: impl Into<String>) -> Self {
        Self {
            design: design.into(),
            garment: garment.into(),
        }
    }
}

/// Session-owned settings table.
///
/// Entries are created with defaults the first time they are referenced and
/// afterwards only overwritten, never removed.
#[derive(Clone, Debug, Default)]
pub struct SettingsStore {
    entries: HashMap<ComboKey, Settings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the settings for `key`, inserting defaults on first reference.
    pub fn get(&mut self, key: &ComboKey) -> Settings {
        self.entries.entry(key.clone()).or_default().clone()
    }

    /// Returns the settings for `key` without inserting; defaults if absent.
    pub fn resolve(&self, key: &ComboKey) -> Settings {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Overwrites the settings for `key`.
    pub fn set(&mut self, key: ComboKey, settings: Settings) {
        self.entries.insert(key, settings);
    }

    /// Copies the settings of `key` for pasting elsewhere.
    pub fn copy_from(&mut self, key: &ComboKey) -> Settings {
        self.get(key)
    }

    /// Copies the settings of `from` onto `to` and returns them.
    pub fn paste(&mut self, from: &ComboKey, to: ComboKey) -> Settings {
        let copied = self.copy_from(from);
        self.set(to, copied.clone());
        copied
    }

    /// Whether `key` has been referenced.
    pub fn contains(&self, key: &ComboKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored combinations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_reference_values() {
        let s = Settings::default();
        assert_eq!((s.guide(), s.scale(), s.offset()), ("STANDARD", 100, 0));
    }

    #[test]
    fn ranges_are_inclusive() {
        assert!(Settings::new("STANDARD", 50, -100).is_ok());
        assert!(Settings::new("STANDARD", 100, 100).is_ok());
        assert_eq!(
            Settings::new("STANDARD", 49, 0).err(),
            Some(MockupError::InvalidSettings {
                field: "scale",
                value: "49".to_string()
            })
        );
        assert!(Settings::new("STANDARD", 80, 101).is_err());
        assert!(Settings::new("  ", 80, 0).is_err());
    }
}
