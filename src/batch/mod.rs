//! Batch previews and exports over designs, garments, and colorways.
//!
//! Each (design, garment, colorway) unit renders independently. A unit that
//! fails (missing photo, guide without a placement region, degenerate fit) is
//! recorded in the report and skipped; the rest of the batch still renders.
//! Guides are fetched and their placement boxes detected once per
//! (garment, guide) pair. With the `rayon` feature and
//! [`ExportOptions::parallel`] set, units render on the rayon pool; output
//! order is the same either way.
//!
//! [`export`] keeps every rendered image in the returned report.
//! [`export_to`] hands each design's mockups to a sink before the next
//! design renders, so at most one design's images are in memory.

mod sink;

#[cfg(feature = "image-io")]
pub use sink::DirSink;
pub use sink::{ExportSink, MemorySink};

use crate::assets::AssetProvider;
use crate::catalog::{Catalog, GarmentSpec};
use crate::design::DesignCrop;
use crate::pipeline::render_placed;
use crate::placement::{detect_placement_box, PlacementBox};
use crate::recolor::ColorMode;
use crate::settings::{ComboKey, Settings, SettingsStore};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{MockupError, MockupResult};
use image::{RgbImage, RgbaImage};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::collections::HashMap;

/// A normalized design and the name used in output files.
#[derive(Clone, Debug)]
pub struct NamedDesign {
    pub name: String,
    pub crop: DesignCrop,
}

impl NamedDesign {
    /// Normalizes `design` under `name`.
    pub fn new(name: impl Into<String>, design: &RgbaImage) -> MockupResult<Self> {
        Ok(Self {
            name: name.into(),
            crop: DesignCrop::normalize(design)?,
        })
    }
}

/// Options shared by every unit of a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Colour treatment for every design.
    pub color_mode: ColorMode,
    /// Render units in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

/// Output file name for a unit: `{design}_{garment}_{colorway}.jpg`.
pub fn export_name(design: &str, garment: &str, colorway: &str) -> String {
    format!("{design}_{garment}_{colorway}.jpg")
}

/// A successfully rendered unit.
#[derive(Clone, Debug)]
pub struct RenderedMockup {
    pub design: String,
    pub garment: String,
    pub colorway: String,
    pub image: RgbImage,
}

impl RenderedMockup {
    /// Export file name for this mockup.
    pub fn file_name(&self) -> String {
        export_name(&self.design, &self.garment, &self.colorway)
    }
}

/// A unit that could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitFailure {
    pub design: String,
    pub garment: String,
    pub colorway: String,
    pub error: MockupError,
}

/// Result of a batch run, in design -> garment -> colorway order.
#[derive(Clone, Debug, Default)]
pub struct ExportReport {
    pub rendered: Vec<RenderedMockup>,
    pub failures: Vec<UnitFailure>,
}

impl ExportReport {
    /// Writes every rendered mockup to `sink`, returning how many were written.
    pub fn write_to<S: ExportSink + ?Sized>(&self, sink: &mut S) -> MockupResult<usize> {
        for mockup in &self.rendered {
            sink.write(&mockup.file_name(), &mockup.image)?;
        }
        Ok(self.rendered.len())
    }

    /// Looks up a rendered mockup.
    pub fn find(&self, design: &str, garment: &str, colorway: &str) -> Option<&RenderedMockup> {
        self.rendered
            .iter()
            .find(|m| m.design == design && m.garment == garment && m.colorway == colorway)
    }
}

/// Result of a streamed export: file names handed to the sink, plus failed units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<String>,
    pub failures: Vec<UnitFailure>,
}

struct Unit<'a> {
    design: &'a NamedDesign,
    garment: &'a GarmentSpec,
    colorway: &'a str,
    settings: Settings,
}

/// Renders every design on every colorway of every garment in `catalog`.
pub fn export<A>(
    designs: &[NamedDesign],
    catalog: &Catalog,
    assets: &A,
    store: &SettingsStore,
    options: ExportOptions,
) -> ExportReport
where
    A: AssetProvider + ?Sized,
{
    let _span = trace_span!("export", designs = designs.len()).entered();
    let units = designs
        .iter()
        .flat_map(|design| design_units(design, catalog, store))
        .collect();
    run_units(units, assets, options)
}

/// Like [`export`], but writes each design's mockups to `sink` as soon as
/// that design has rendered.
///
/// Unit failures are collected in the summary. A sink error stops the export.
pub fn export_to<A, S>(
    designs: &[NamedDesign],
    catalog: &Catalog,
    assets: &A,
    store: &SettingsStore,
    options: ExportOptions,
    sink: &mut S,
) -> MockupResult<ExportSummary>
where
    A: AssetProvider + ?Sized,
    S: ExportSink + ?Sized,
{
    let _span = trace_span!("export_to", designs = designs.len()).entered();
    let mut summary = ExportSummary::default();
    for design in designs {
        let report = run_units(design_units(design, catalog, store), assets, options);
        for mockup in report.rendered {
            let name = mockup.file_name();
            sink.write(&name, &mockup.image)?;
            summary.written.push(name);
        }
        summary.failures.extend(report.failures);
    }
    Ok(summary)
}

fn design_units<'a>(
    design: &'a NamedDesign,
    catalog: &'a Catalog,
    store: &SettingsStore,
) -> Vec<Unit<'a>> {
    let mut units = Vec::new();
    for garment in catalog.garments() {
        let settings = store.resolve(&ComboKey::new(&design.name, &garment.name));
        for colorway in &garment.colorways {
            units.push(Unit {
                design,
                garment,
                colorway,
                settings: settings.clone(),
            });
        }
    }
    units
}

/// Renders `design` on each garment's preview colorway.
pub fn preview<A>(
    design: &NamedDesign,
    catalog: &Catalog,
    assets: &A,
    store: &SettingsStore,
    color_mode: ColorMode,
) -> ExportReport
where
    A: AssetProvider + ?Sized,
{
    let _span = trace_span!("preview").entered();
    let units = catalog
        .garments()
        .iter()
        .map(|garment| Unit {
            design,
            garment,
            colorway: &garment.preview,
            settings: store.resolve(&ComboKey::new(&design.name, &garment.name)),
        })
        .collect();
    run_units(
        units,
        assets,
        ExportOptions {
            color_mode,
            parallel: false,
        },
    )
}

/// Renders a single (design, garment, colorway) unit with explicit settings.
pub fn render_unit<A>(
    design: &DesignCrop,
    garment: &GarmentSpec,
    colorway: &str,
    assets: &A,
    settings: &Settings,
    color_mode: ColorMode,
) -> MockupResult<RgbImage>
where
    A: AssetProvider + ?Sized,
{
    if !garment.has_colorway(colorway) {
        return Err(MockupError::UnknownColorway {
            garment: garment.name.clone(),
            colorway: colorway.to_string(),
        });
    }
    let photo = assets.garment_photo(&garment.name, colorway)?;
    let guide = assets.guide(&garment.name, settings.guide())?;
    let placement = detect_placement_box(&guide)?;
    render_placed(
        design,
        &placement,
        &photo,
        settings,
        color_mode,
        garment.is_dark(colorway),
    )
}

type PlacementTable = HashMap<(String, String), MockupResult<PlacementBox>>;

fn run_units<A>(units: Vec<Unit<'_>>, assets: &A, options: ExportOptions) -> ExportReport
where
    A: AssetProvider + ?Sized,
{
    let mut placements = PlacementTable::new();
    for unit in &units {
        let key = (unit.garment.name.clone(), unit.settings.guide().to_string());
        placements.entry(key).or_insert_with_key(|(garment, guide)| {
            assets
                .guide(garment, guide)
                .and_then(|img| detect_placement_box(&img))
        });
    }

    let render_one = |unit: &Unit<'_>| -> MockupResult<RgbImage> {
        let photo = assets.garment_photo(&unit.garment.name, unit.colorway)?;
        let key = (unit.garment.name.clone(), unit.settings.guide().to_string());
        let placement = match placements.get(&key) {
            Some(Ok(placement)) => *placement,
            Some(Err(err)) => return Err(err.clone()),
            None => {
                let guide = assets.guide(&key.0, &key.1)?;
                detect_placement_box(&guide)?
            }
        };
        render_placed(
            &unit.design.crop,
            &placement,
            &photo,
            &unit.settings,
            options.color_mode,
            unit.garment.is_dark(unit.colorway),
        )
    };

    #[cfg(feature = "rayon")]
    let results: Vec<MockupResult<RgbImage>> = if options.parallel {
        units.par_iter().map(render_one).collect()
    } else {
        units.iter().map(render_one).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let results: Vec<MockupResult<RgbImage>> = units.iter().map(render_one).collect();

    let mut report = ExportReport::default();
    for (unit, result) in units.iter().zip(results) {
        match result {
            Ok(image) => report.rendered.push(RenderedMockup {
                design: unit.design.name.clone(),
                garment: unit.garment.name.clone(),
                colorway: unit.colorway.to_string(),
                image,
            }),
            Err(error) => {
                trace_warn!(
                    "unit_skipped",
                    design = unit.design.name.as_str(),
                    garment = unit.garment.name.as_str(),
                    colorway = unit.colorway,
                    error = %error
                );
                report.failures.push(UnitFailure {
                    design: unit.design.name.clone(),
                    garment: unit.garment.name.clone(),
                    colorway: unit.colorway.to_string(),
                    error,
                });
            }
        }
    }
    trace_event!(
        "batch_done",
        rendered = report.rendered.len(),
        failed = report.failures.len()
    );
    report
}
