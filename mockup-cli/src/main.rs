use clap::{Parser, ValueEnum};
use mockup::io::{design_name_from_path, load_rgba, DEFAULT_JPEG_QUALITY};
use mockup::{
    export_to, preview, Catalog, ColorMode, ComboKey, DirAssets, DirSink, ExportOptions,
    GarmentSpec, NamedDesign, Settings, SettingsStore, UnitFailure,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Mockup CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "mockup.json")]
    config: PathBuf,
    /// Override the run mode from the config.
    #[arg(long, value_enum)]
    mode: Option<RunMode>,
    /// Override the colour mode from the config (e.g. `standard_bw`, `royal_blue`).
    #[arg(long)]
    color_mode: Option<ColorMode>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
enum RunMode {
    /// One mockup per garment on its preview colorway.
    Preview,
    /// Every colorway of every garment.
    #[default]
    Export,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    designs: Vec<PathBuf>,
    assets_dir: PathBuf,
    output_dir: PathBuf,
    mode: RunMode,
    color_mode: ColorMode,
    /// Garments to render; empty means the whole catalog.
    garments: Vec<String>,
    /// Replaces the built-in catalog when present.
    catalog: Option<Vec<GarmentSpec>>,
    /// design name -> garment -> settings.
    settings: BTreeMap<String, BTreeMap<String, Settings>>,
    jpeg_quality: u8,
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            designs: Vec::new(),
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("mockups"),
            mode: RunMode::default(),
            color_mode: ColorMode::default(),
            garments: Vec::new(),
            catalog: None,
            settings: BTreeMap::new(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            parallel: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureRecord {
    design: String,
    garment: Option<String>,
    colorway: Option<String>,
    error: String,
}

#[derive(Debug, Default, Serialize)]
struct Output {
    written: Vec<PathBuf>,
    failures: Vec<FailureRecord>,
}

impl Output {
    fn absorb(&mut self, failures: &[UnitFailure]) {
        self.failures
            .extend(failures.iter().map(|f| FailureRecord {
                design: f.design.clone(),
                garment: Some(f.garment.clone()),
                colorway: Some(f.colorway.clone()),
                error: f.error.to_string(),
            }));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("mockup=info".parse()?)
                    .add_directive("mockup_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.designs.is_empty() {
        return Err("designs must list at least one design file".into());
    }
    let mode = cli.mode.unwrap_or(config.mode);
    let color_mode = cli.color_mode.unwrap_or(config.color_mode);

    let catalog = match config.catalog {
        Some(specs) => Catalog::new(specs)?,
        None => Catalog::builtin(),
    };
    let catalog = if config.garments.is_empty() {
        catalog
    } else {
        catalog.only(&config.garments)?
    };

    let mut store = SettingsStore::new();
    for (design, per_garment) in config.settings {
        for (garment, settings) in per_garment {
            store.set(ComboKey::new(design.clone(), garment), settings);
        }
    }

    let mut output = Output::default();
    let mut designs = Vec::with_capacity(config.designs.len());
    for path in &config.designs {
        let name = design_name_from_path(path)
            .ok_or_else(|| format!("cannot derive a design name from {}", path.display()))?;
        match load_rgba(path).and_then(|img| NamedDesign::new(name.clone(), &img)) {
            Ok(design) => designs.push(design),
            Err(err) => {
                warn!(design = %name, path = %path.display(), error = %err, "design skipped");
                output.failures.push(FailureRecord {
                    design: name,
                    garment: None,
                    colorway: None,
                    error: err.to_string(),
                });
            }
        }
    }

    let assets = DirAssets::new(&config.assets_dir);
    let mut sink = DirSink::create(&config.output_dir)?.with_quality(config.jpeg_quality);
    match mode {
        RunMode::Preview => {
            for design in &designs {
                let report = preview(design, &catalog, &assets, &store, color_mode);
                report.write_to(&mut sink)?;
                output.absorb(&report.failures);
            }
        }
        RunMode::Export => {
            let summary = export_to(
                &designs,
                &catalog,
                &assets,
                &store,
                ExportOptions {
                    color_mode,
                    parallel: config.parallel,
                },
                &mut sink,
            )?;
            output.absorb(&summary.failures);
        }
    }
    output.written = sink.written().to_vec();
    info!(
        written = output.written.len(),
        failed = output.failures.len(),
        "run finished"
    );

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
