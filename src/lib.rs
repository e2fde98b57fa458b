//! Mockup is a placement-and-compositing engine for apparel mockups.
//!
//! A transparent design is trimmed to its visible pixels, fitted into the
//! placement box marked by a guide image, optionally recolored to a solid
//! silhouette, and composited onto a garment photo. Each render is a pure
//! function of its inputs; batch helpers fan it out over garments and
//! colorways, with optional parallelism via the `rayon` feature and file I/O
//! via `image-io`.

pub mod assets;
pub mod batch;
pub mod cache;
pub mod catalog;
pub mod composite;
pub mod design;
pub mod fit;
pub mod image;
pub mod pipeline;
pub mod placement;
pub mod recolor;
pub mod settings;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use assets::{AssetProvider, MemoryAssets};
pub use batch::{
    export, export_name, export_to, preview, render_unit, ExportOptions, ExportReport,
    ExportSink, ExportSummary, MemorySink, NamedDesign, RenderedMockup, UnitFailure,
};
pub use cache::{PreviewCache, PreviewKey};
pub use catalog::{Catalog, GarmentSpec};
pub use composite::{composite, paste_position};
pub use design::{normalize_design, DesignCrop};
pub use fit::{fit_resize, FitPlan};
pub use pipeline::{render, render_crop, render_placed};
pub use placement::{detect_placement_box, PlacementBox, GUIDE_ALPHA_THRESHOLD};
pub use recolor::{recolor, ColorMode, NamedHue};
pub use settings::{ComboKey, Settings, SettingsStore};
pub use util::{AssetKind, MockupError, MockupResult};

#[cfg(feature = "image-io")]
pub use assets::DirAssets;
#[cfg(feature = "image-io")]
pub use batch::DirSink;
