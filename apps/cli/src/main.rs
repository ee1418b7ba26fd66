// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! levelobj - convert Krunker level documents to Wavefront OBJ/MTL pairs
//!
//! With no inputs, converts the default level set (`burg`, `littletown`,
//! `sandstorm`, `subzero`, `kanji`) from the input directory. Each document
//! produces `<name>.obj` and `<name>.mtl` in the output directory.
//!
//! Environment: `LEVELOBJ_INPUT_DIR`, `LEVELOBJ_OUTPUT_DIR`,
//! `LEVELOBJ_ASSET_DIR`, `LEVELOBJ_CATALOG`, `LEVELOBJ_WORKER_THREADS`.
//! Flags take precedence.

use anyhow::{bail, Context, Result};
use clap::Parser;
use levelobj_geometry::MeshCache;
use levelobj_processing::{
    convert_batch, default_inputs, BatchOptions, BatchReport, ConvertOptions, Converter,
    ModelCatalog,
};
use std::path::PathBuf;

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "levelobj")]
#[command(about = "Convert Krunker level JSON to Wavefront OBJ/MTL")]
#[command(version)]
struct Cli {
    /// Level documents to convert (defaults to the built-in level set)
    inputs: Vec<PathBuf>,

    /// Directory holding the default level set
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Asset root for catalog meshes
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// JSON model catalog replacing the built-in table
    #[arg(short, long, conflicts_with = "no_models")]
    catalog: Option<PathBuf>,

    /// Skip every model placement instead of instancing meshes
    #[arg(long)]
    no_models: bool,

    /// Convert documents in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Continue with the remaining documents after a failure
    #[arg(short, long)]
    keep_going: bool,

    /// Worker threads for --parallel
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

/// Settings after merging flags over the environment
#[derive(Debug)]
struct Settings {
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    asset_dir: PathBuf,
    catalog: CatalogSource,
    parallel: bool,
    keep_going: bool,
    worker_threads: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum CatalogSource {
    Builtin,
    File(PathBuf),
    Disabled,
}

impl Settings {
    fn resolve(cli: Cli, config: Config) -> Self {
        let input_dir = cli.input_dir.unwrap_or(config.input_dir);
        let inputs = if cli.inputs.is_empty() {
            default_inputs(&input_dir)
        } else {
            cli.inputs
        };
        let catalog = if cli.no_models {
            CatalogSource::Disabled
        } else {
            match cli.catalog.or(config.catalog) {
                Some(path) => CatalogSource::File(path),
                None => CatalogSource::Builtin,
            }
        };

        Self {
            inputs,
            output_dir: cli.output.unwrap_or(config.output_dir),
            asset_dir: cli.assets.unwrap_or(config.asset_dir),
            catalog,
            parallel: cli.parallel,
            keep_going: cli.keep_going,
            worker_threads: cli.jobs.filter(|&n| n > 0).unwrap_or(config.worker_threads),
        }
    }

    fn load_catalog(&self) -> Result<ModelCatalog> {
        match &self.catalog {
            CatalogSource::Builtin => Ok(ModelCatalog::krunker_default()),
            CatalogSource::File(path) => ModelCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load model catalog {}", path.display())),
            CatalogSource::Disabled => Ok(ModelCatalog::empty()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,levelobj=debug".into()),
        )
        .init();

    let settings = Settings::resolve(Cli::parse(), Config::from_env());

    tracing::info!(
        documents = settings.inputs.len(),
        output_dir = %settings.output_dir.display(),
        asset_dir = %settings.asset_dir.display(),
        parallel = settings.parallel,
        "Starting level conversion"
    );

    if settings.parallel {
        rayon::ThreadPoolBuilder::new()
            .num_threads(settings.worker_threads)
            .build_global()
            .context("Failed to initialize worker pool")?;
    }

    let report = run(&settings)?;
    summarize(&report)
}

fn run(settings: &Settings) -> Result<BatchReport> {
    let catalog = settings.load_catalog()?;
    tracing::debug!(models = catalog.len(), "Model catalog ready");

    let cache = MeshCache::new();
    let options = ConvertOptions {
        asset_root: settings.asset_dir.clone(),
    };
    let converter = Converter::new(&catalog, &cache, &options);

    let batch = BatchOptions {
        output_dir: settings.output_dir.clone(),
        parallel: settings.parallel,
        keep_going: settings.keep_going,
    };
    let report = convert_batch(&converter, &settings.inputs, &batch);
    tracing::debug!(meshes = cache.len(), "Mesh cache after batch");
    Ok(report)
}

fn summarize(report: &BatchReport) -> Result<()> {
    for outcome in &report.outcomes {
        if let Ok((artifacts, stats)) = &outcome.result {
            tracing::info!(
                input = %outcome.input.display(),
                obj = %artifacts.obj.display(),
                boxes = stats.boxes,
                wedges = stats.wedges,
                models = stats.models,
                skipped = stats.hidden + stats.unsupported,
                "Converted"
            );
        }
    }

    let failed = report.failures().count();
    tracing::info!(
        succeeded = report.succeeded(),
        failed,
        "Conversion finished"
    );

    if failed > 0 {
        let first = report
            .failures()
            .next()
            .map(|(input, err)| format!("{}: {err}", input.display()))
            .unwrap_or_default();
        bail!("{failed} document(s) failed to convert (first: {first})");
    }
    Ok(())
}
