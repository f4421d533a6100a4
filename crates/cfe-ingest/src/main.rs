//! CLI entry point for dataset ingestion.

use anyhow::{Context, Result, anyhow};
use cfe_ingest::utils::truncate_str;
use cfe_ingest::{DatasetLoader, IngestConfig, LoadedDataset};
use clap::Parser;
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Load a cell feature table and show how it will be plotted",
    long_about = "Parses a delimited feature table, classifies every feature as \
                  continuous or discrete, and prints the resolved default axes.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  CFE_THUMBNAIL_ROOT            Root for thumbnail paths\n  \
                  CFE_DOWNLOAD_ROOT             Root for raw data downloads\n  \
                  CFE_VOLUME_VIEWER_DATA_ROOT   Root for 3D viewer volumes\n\n\
                  EXAMPLES:\n  \
                  cfe-ingest -i features.csv\n  \
                  cfe-ingest -i features.tsv --delimiter '\\t' --json | jq .defaults"
)]
struct Args {
    /// Path to the delimited feature table
    #[arg(short, long)]
    input: PathBuf,

    /// Dataset identifier (defaults to the file stem)
    #[arg(long)]
    dataset_id: Option<String>,

    /// JSON file with ingestion settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field delimiter (single character, `\t` for tab)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Header of the cell id column
    #[arg(long)]
    cell_id_column: Option<String>,

    /// Use row indices as cell ids when the cell id column is absent
    #[arg(long)]
    synthesize_cell_ids: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logging; only the feature definitions, defaults and plot
    /// data are written.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    dotenv().ok();

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = build_config(&args)?;
    debug!("Effective config: {:?}", config);

    let dataset_id = args.dataset_id.clone().unwrap_or_else(|| file_stem(&args.input));
    let loader = DatasetLoader::new(config)?;
    let dataset = loader
        .load_csv_file(&dataset_id, &args.input)
        .context("Could not load dataset")?;

    if args.json {
        let output = serde_json::json!({
            "featureDefs": dataset.feature_defs(),
            "defaults": dataset.defaults,
            "data": dataset.data(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&dataset);
    }

    Ok(())
}

/// Merge config file, environment and flags (flags win).
fn build_config(args: &Args) -> Result<IngestConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Reading config from: {}", path.display());
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<IngestConfig>(&text).context("Invalid config file")?
        }
        None => IngestConfig::default(),
    };

    if let Ok(root) = std::env::var("CFE_THUMBNAIL_ROOT") {
        config.thumbnail_root = Some(root);
    }
    if let Ok(root) = std::env::var("CFE_DOWNLOAD_ROOT") {
        config.download_root = Some(root);
    }
    if let Ok(root) = std::env::var("CFE_VOLUME_VIEWER_DATA_ROOT") {
        config.volume_viewer_data_root = Some(root);
    }

    if let Some(delimiter) = &args.delimiter {
        config.delimiter = parse_delimiter(delimiter)?;
    } else if has_extension(&args.input, "tsv") {
        config.delimiter = b'\t';
    }
    if let Some(column) = &args.cell_id_column {
        config.cell_id_column = column.clone();
    }
    if args.synthesize_cell_ids {
        config.synthesize_cell_ids = true;
    }

    config.validate()?;
    Ok(config)
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 => Ok(s.as_bytes()[0]),
        s => Err(anyhow!("Delimiter must be a single character, got '{}'", s)),
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// Print the human-readable dataset summary.
fn print_summary(dataset: &LoadedDataset) {
    let data = dataset.data();

    println!("\n{}", "=".repeat(72));
    println!("DATASET '{}'", dataset.id);
    println!("{}\n", "=".repeat(72));

    println!("OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Cells: {}", data.len());
    println!("  Source columns: {}", dataset.source_columns.len());
    println!("  Features: {}", dataset.feature_defs().len());
    println!();

    println!("FEATURES");
    println!("{}", "-".repeat(40));
    println!("{:<32} {:<12} {:<8} {:<10}", "Feature", "Type", "Valid", "Categories");
    println!("{}", "-".repeat(66));
    for def in dataset.feature_defs() {
        let valid = data
            .values_for(&def.key)
            .map_or(0, |v| v.iter().filter(|x| x.is_some()).count());
        let categories = def
            .options
            .as_ref()
            .map_or_else(|| "-".to_string(), |o| o.len().to_string());
        println!(
            "{:<32} {:<12} {:<8} {:<10}",
            truncate_str(&def.key, 31),
            if def.discrete { "discrete" } else { "continuous" },
            valid,
            categories
        );
    }
    println!();

    let defaults = &dataset.defaults;
    println!("DEFAULT SELECTION");
    println!("{}", "-".repeat(40));
    println!("  X axis:   {}", defaults.default_x_axis);
    println!("  Y axis:   {}", defaults.default_y_axis);
    println!("  Color by: {}", defaults.default_color_by);
    println!("  Group by: {}", defaults.default_group_by);
    if let Some(root) = &defaults.thumbnail_root {
        println!("  Thumbnail root: {}", root);
    }
    if let Some(root) = &defaults.download_root {
        println!("  Download root: {}", root);
    }
    if let Some(root) = &defaults.volume_viewer_data_root {
        println!("  Volume viewer root: {}", root);
    }
    println!();
}
