use image::{Rgb, RgbImage, Rgba, RgbaImage};
use mockup::{
    export, export_name, export_to, preview, render_unit, AssetKind, Catalog, ColorMode, ComboKey,
    ExportOptions, ExportSink, GarmentSpec, MemoryAssets, MemorySink, MockupError, MockupResult,
    NamedDesign, PreviewCache, PreviewKey, Settings, SettingsStore,
};

const SIZE: u32 = 120;

fn make_guide(x0: u32, y0: u32, x1: u32, y1: u32) -> RgbaImage {
    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([128, 128, 128, 255])
        }
    })
}

fn photo(rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(SIZE, SIZE, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        GarmentSpec::new("tshirts", "WHITE", &["WHITE", "BLACK", "PINK"], &["BLACK"]),
        GarmentSpec::new("hoodies", "BLACK", &["BLACK", "GREY"], &["BLACK"]),
    ])
    .unwrap()
}

fn assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_photo("tshirts", "WHITE", photo([250, 250, 250]))
        .with_photo("tshirts", "BLACK", photo([5, 5, 5]))
        .with_photo("hoodies", "BLACK", photo([10, 10, 10]))
        .with_photo("hoodies", "GREY", photo([120, 120, 120]))
        .with_guide("tshirts", "STANDARD", make_guide(20, 20, 100, 100))
        .with_guide("hoodies", "STANDARD", make_guide(30, 30, 90, 90))
        .with_guide("hoodies", "BROKEN", RgbaImage::from_pixel(SIZE, SIZE, Rgba([0, 0, 0, 255])))
}

fn designs() -> Vec<NamedDesign> {
    let logo = RgbaImage::from_fn(64, 64, |x, y| {
        if (8..56).contains(&x) && (8..56).contains(&y) {
            Rgba([200, 40, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    vec![NamedDesign::new("logo", &logo).unwrap()]
}

#[test]
fn export_renders_available_units_and_records_missing_photo() {
    let report = export(
        &designs(),
        &catalog(),
        &assets(),
        &SettingsStore::new(),
        ExportOptions::default(),
    );

    let names: Vec<String> = report.rendered.iter().map(|m| m.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "logo_tshirts_WHITE.jpg",
            "logo_tshirts_BLACK.jpg",
            "logo_hoodies_BLACK.jpg",
            "logo_hoodies_GREY.jpg",
        ]
    );
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.colorway, "PINK");
    assert_eq!(
        failure.error,
        MockupError::AssetNotFound {
            kind: AssetKind::GarmentPhoto,
            garment: "tshirts".to_string(),
            name: "PINK".to_string(),
        }
    );

    let center = (SIZE / 2, SIZE / 2);
    let white_shirt = report.find("logo", "tshirts", "WHITE").unwrap();
    assert_eq!(white_shirt.image.get_pixel(center.0, center.1).0, [0, 0, 0]);
    let black_shirt = report.find("logo", "tshirts", "BLACK").unwrap();
    assert_eq!(black_shirt.image.get_pixel(center.0, center.1).0, [255, 255, 255]);
    assert_eq!(black_shirt.image.get_pixel(2, 2).0, [5, 5, 5]);
}

#[test]
fn invalid_guide_fails_only_its_garment() {
    let mut store = SettingsStore::new();
    store.set(
        ComboKey::new("logo", "hoodies"),
        Settings::new("BROKEN", 100, 0).unwrap(),
    );
    let report = export(&designs(), &catalog(), &assets(), &store, ExportOptions::default());

    assert_eq!(report.rendered.len(), 2);
    assert!(report.rendered.iter().all(|m| m.garment == "tshirts"));
    let hoodie_errors: Vec<_> = report
        .failures
        .iter()
        .filter(|f| f.garment == "hoodies")
        .map(|f| f.error.clone())
        .collect();
    assert_eq!(
        hoodie_errors,
        vec![MockupError::InvalidGuide { threshold: 10 }; 2]
    );
}

#[test]
fn missing_guide_is_asset_not_found() {
    let mut store = SettingsStore::new();
    store.set(
        ComboKey::new("logo", "tshirts"),
        Settings::new("POCKET", 80, 0).unwrap(),
    );
    let report = export(&designs(), &catalog(), &assets(), &store, ExportOptions::default());
    assert!(report.failures.iter().any(|f| f.error
        == MockupError::AssetNotFound {
            kind: AssetKind::Guide,
            garment: "tshirts".to_string(),
            name: "POCKET".to_string(),
        }));
}

#[test]
fn unchanged_mode_keeps_design_colours() {
    let report = export(
        &designs(),
        &catalog(),
        &assets(),
        &SettingsStore::new(),
        ExportOptions {
            color_mode: ColorMode::Unchanged,
            parallel: false,
        },
    );
    let hoodie = report.find("logo", "hoodies", "GREY").unwrap();
    assert_eq!(hoodie.image.get_pixel(SIZE / 2, SIZE / 2).0, [200, 40, 40]);
}

#[test]
fn preview_uses_preview_colorway_per_garment() {
    let design = &designs()[0];
    let report = preview(
        design,
        &catalog(),
        &assets(),
        &SettingsStore::new(),
        ColorMode::StandardBw,
    );
    let got: Vec<(&str, &str)> = report
        .rendered
        .iter()
        .map(|m| (m.garment.as_str(), m.colorway.as_str()))
        .collect();
    assert_eq!(got, vec![("tshirts", "WHITE"), ("hoodies", "BLACK")]);
    assert!(report.failures.is_empty());
}

#[test]
fn render_unit_rejects_unlisted_colorway() {
    let catalog = catalog();
    let garment = catalog.garment("hoodies").unwrap();
    let err = render_unit(
        &designs()[0].crop,
        garment,
        "PINK",
        &assets(),
        &Settings::default(),
        ColorMode::StandardBw,
    )
    .err()
    .unwrap();
    assert_eq!(
        err,
        MockupError::UnknownColorway {
            garment: "hoodies".to_string(),
            colorway: "PINK".to_string(),
        }
    );
}

#[test]
fn report_writes_every_rendered_mockup_to_sink() {
    let report = export(
        &designs(),
        &catalog(),
        &assets(),
        &SettingsStore::new(),
        ExportOptions::default(),
    );
    let mut sink = MemorySink::default();
    let written = report.write_to(&mut sink).unwrap();
    assert_eq!(written, 4);
    assert!(sink
        .entries
        .contains_key(&export_name("logo", "hoodies", "GREY")));
    assert!(!sink.entries.contains_key("logo_tshirts_PINK.jpg"));
}

/// Accepts a fixed number of writes, then fails.
struct FullSink {
    capacity: usize,
    names: Vec<String>,
}

impl ExportSink for FullSink {
    fn write(&mut self, name: &str, _image: &RgbImage) -> MockupResult<()> {
        if self.names.len() == self.capacity {
            return Err(MockupError::ImageIo {
                reason: "sink full".to_string(),
            });
        }
        self.names.push(name.to_string());
        Ok(())
    }
}

#[test]
fn export_to_matches_export_and_keeps_failures() {
    let mut designs = designs();
    let copy = designs[0].clone();
    designs.push(copy);
    designs[1].name = "badge".to_string();
    let store = SettingsStore::new();
    let report = export(&designs, &catalog(), &assets(), &store, ExportOptions::default());

    let mut sink = MemorySink::default();
    let summary = export_to(
        &designs,
        &catalog(),
        &assets(),
        &store,
        ExportOptions::default(),
        &mut sink,
    )
    .unwrap();

    let expected: Vec<String> = report.rendered.iter().map(|m| m.file_name()).collect();
    assert_eq!(summary.written, expected);
    assert_eq!(summary.failures, report.failures);
    assert_eq!(sink.entries.len(), 8);
    for mockup in &report.rendered {
        assert_eq!(sink.entries[&mockup.file_name()], mockup.image);
    }
}

#[test]
fn export_to_stops_on_sink_error() {
    let mut sink = FullSink {
        capacity: 2,
        names: Vec::new(),
    };
    let err = export_to(
        &designs(),
        &catalog(),
        &assets(),
        &SettingsStore::new(),
        ExportOptions::default(),
        &mut sink,
    )
    .err();
    assert_eq!(
        err,
        Some(MockupError::ImageIo {
            reason: "sink full".to_string(),
        })
    );
    assert_eq!(sink.names.len(), 2);
}

#[test]
fn settings_store_creates_defaults_and_pastes() {
    let mut store = SettingsStore::new();
    let a = ComboKey::new("logo", "tshirts");
    let b = ComboKey::new("logo", "hoodies");

    assert!(!store.contains(&a));
    assert_eq!(store.resolve(&a), Settings::default());
    assert!(!store.contains(&a));
    assert_eq!(store.get(&a), Settings::default());
    assert!(store.contains(&a));

    let edited = Settings::new("POCKET", 75, -40).unwrap();
    store.set(a.clone(), edited.clone());
    assert_eq!(store.copy_from(&a), edited);
    assert_eq!(store.paste(&a, b.clone()), edited);
    assert_eq!(store.get(&b), edited);
    assert_eq!(store.len(), 2);
}

#[test]
fn preview_cache_renders_only_when_missing_or_refreshed() {
    let mut cache = PreviewCache::new();
    let key = PreviewKey::new("logo", "tshirts", "WHITE");
    let settings = Settings::default();
    let mut renders = 0;

    let mut render = |value: u8| -> MockupResult<RgbImage> {
        renders += 1;
        Ok(RgbImage::from_pixel(1, 1, Rgb([value; 3])))
    };

    let first = cache
        .get_or_render(key.clone(), &settings, ColorMode::StandardBw, false, || render(1))
        .unwrap()
        .clone();
    let edited = settings.with_scale(60).unwrap();
    assert!(cache.is_stale(&key, &edited, ColorMode::StandardBw));
    let cached = cache
        .get_or_render(key.clone(), &edited, ColorMode::StandardBw, false, || render(2))
        .unwrap()
        .clone();
    assert_eq!(first, cached);

    let refreshed = cache
        .get_or_render(key.clone(), &edited, ColorMode::StandardBw, true, || render(3))
        .unwrap()
        .clone();
    assert_eq!(refreshed.get_pixel(0, 0).0, [3, 3, 3]);
    assert!(!cache.is_stale(&key, &edited, ColorMode::StandardBw));
    assert_eq!(renders, 2);

    let failed = cache.get_or_render(key.clone(), &edited, ColorMode::StandardBw, true, || {
        Err(MockupError::EmptyDesign)
    });
    assert_eq!(failed.err(), Some(MockupError::EmptyDesign));
    assert_eq!(cache.get(&key).unwrap().get_pixel(0, 0).0, [3, 3, 3]);

    cache.invalidate_design("logo");
    assert!(cache.is_empty());
}
