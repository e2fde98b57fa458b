//! Garment catalogue: colorways, preview colorway, and dark classification.
//!
//! The catalogue is built once and read-only afterwards.

use crate::util::{MockupError, MockupResult};
use serde::{Deserialize, Serialize};

const CORE_COLORWAYS: [&str; 5] = ["BABY_BLUE", "BLACK", "GREEN", "MAROON", "NAVY_BLUE"];

/// One garment type and its colorways.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentSpec {
    /// Garment type name, also the asset folder name (`"hoodies"`).
    pub name: String,
    /// Colorway rendered for on-screen previews.
    pub preview: String,
    /// Every exportable colorway.
    pub colorways: Vec<String>,
    /// Colorways that take a white fill in black/white mode.
    #[serde(default)]
    pub dark: Vec<String>,
}

impl GarmentSpec {
    pub fn new(name: &str, preview: &str, colorways: &[&str], dark: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            preview: preview.to_string(),
            colorways: colorways.iter().map(|c| c.to_string()).collect(),
            dark: dark.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Whether `colorway` is classified dark.
    pub fn is_dark(&self, colorway: &str) -> bool {
        self.dark.iter().any(|c| c == colorway)
    }

    /// Whether `colorway` is exportable for this garment.
    pub fn has_colorway(&self, colorway: &str) -> bool {
        self.colorways.iter().any(|c| c == colorway)
    }

    /// Title-cased label: `"crop_tops"` becomes `"Crop Tops"`.
    pub fn display_name(&self) -> String {
        self.name
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn validate(&self) -> MockupResult<()> {
        if self.name.is_empty() {
            return Err(MockupError::UnknownGarment {
                garment: self.name.clone(),
            });
        }
        for colorway in std::iter::once(&self.preview).chain(&self.dark) {
            if !self.has_colorway(colorway) {
                return Err(MockupError::UnknownColorway {
                    garment: self.name.clone(),
                    colorway: colorway.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered, immutable list of garments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    garments: Vec<GarmentSpec>,
}

impl Catalog {
    /// Builds a catalogue, checking that preview and dark colorways are listed.
    pub fn new(garments: Vec<GarmentSpec>) -> MockupResult<Self> {
        for garment in &garments {
            garment.validate()?;
        }
        Ok(Self { garments })
    }

    /// The stock apparel catalogue.
    pub fn builtin() -> Self {
        let standard = |extra: [&'static str; 3]| -> Vec<&'static str> {
            let mut all: Vec<&'static str> = CORE_COLORWAYS.to_vec();
            all.extend(extra);
            all
        };
        let garments = vec![
            GarmentSpec::new(
                "tshirts",
                "WHITE",
                &standard(["PINK", "WHITE", "YELLOW"]),
                &CORE_COLORWAYS,
            ),
            GarmentSpec::new(
                "crop_tops",
                "WHITE",
                &standard(["PINK", "WHITE", "RED"]),
                &CORE_COLORWAYS,
            ),
            GarmentSpec::new(
                "hoodies",
                "BLACK",
                &standard(["PINK", "GREY", "YELLOW"]),
                &CORE_COLORWAYS,
            ),
            GarmentSpec::new(
                "sweatshirts",
                "PINK",
                &standard(["PINK", "GREY", "YELLOW"]),
                &CORE_COLORWAYS,
            ),
            GarmentSpec::new(
                "ringer_tees",
                "WHITE-BLACK",
                &["BLACK-WHITE", "WHITE-BLACK", "WHITE-RED"],
                &["BLACK-WHITE"],
            ),
        ];
        Self { garments }
    }

    /// All garments in catalogue order.
    pub fn garments(&self) -> &[GarmentSpec] {
        &self.garments
    }

    /// Looks up a garment by name.
    pub fn garment(&self, name: &str) -> MockupResult<&GarmentSpec> {
        self.garments
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| MockupError::UnknownGarment {
                garment: name.to_string(),
            })
    }

    /// Returns a catalogue limited to `names`, keeping catalogue order.
    pub fn only(&self, names: &[String]) -> MockupResult<Self> {
        for name in names {
            self.garment(name)?;
        }
        let garments = self
            .garments
            .iter()
            .filter(|g| names.contains(&g.name))
            .cloned()
            .collect();
        Ok(Self { garments })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin();
        assert!(Catalog::new(catalog.garments().to_vec()).is_ok());
        assert_eq!(catalog.garments().len(), 5);
    }

    #[test]
    fn display_name_title_cases_words() {
        let spec = GarmentSpec::new("crop_tops", "WHITE", &["WHITE"], &[]);
        assert_eq!(spec.display_name(), "Crop Tops");
    }

    #[test]
    fn new_rejects_dark_colorway_not_listed() {
        let spec = GarmentSpec::new("caps", "BLACK", &["BLACK"], &["NAVY_BLUE"]);
        assert_eq!(
            Catalog::new(vec![spec]).err(),
            Some(MockupError::UnknownColorway {
                garment: "caps".to_string(),
                colorway: "NAVY_BLUE".to_string()
            })
        );
    }
}
