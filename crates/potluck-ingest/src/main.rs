//! Offline companion job: load crawler output into the recipe store.
//!
//! The crawler writes one JSON document per recipe (see `Recipe` in
//! potluck-core for the shape). This tool reads its output as a JSON array or
//! JSON Lines file and writes each valid record at its id key. Malformed
//! records are logged and skipped, never retried, matching the crawler's
//! own contract for malformed source pages.

use anyhow::{Context, Result};
use clap::Parser;
use potluck_core::{Recipe, RecipeStore};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "potluck-ingest")]
#[command(about = "Load crawler output into the potluck recipe store")]
struct Args {
    /// Crawler output file (JSON array or JSON Lines)
    file: PathBuf,

    /// Data directory holding the recipe store
    #[arg(long, env = "POTLUCK_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_parser = ["json", "jsonl"])]
    format: Option<String>,

    /// Parse and report without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if !args.file.exists() {
        anyhow::bail!("File not found: {}", args.file.display());
    }

    let format = args.format.clone().unwrap_or_else(|| {
        match args.file.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => "jsonl",
            _ => "json",
        }
        .to_string()
    });

    info!("Reading {} as {} format...", args.file.display(), format);
    let (recipes, skipped) = read_records(&args.file, &format)?;
    info!("Parsed {} recipes ({} skipped)", recipes.len(), skipped);

    if args.dry_run {
        info!("Dry run: no changes written");
        for recipe in &recipes {
            info!("  [{}] {}", recipe.id, recipe.name);
        }
        return Ok(());
    }

    let store = RecipeStore::open(args.data_dir.join("potluck.redb"))?;
    let mut imported = 0;
    for recipe in &recipes {
        store
            .put_recipe(recipe)
            .with_context(|| format!("Failed to store recipe {}", recipe.id))?;
        imported += 1;
    }

    info!(
        "Imported {} recipes ({} skipped), store now holds {}",
        imported,
        skipped,
        store.count()?
    );
    Ok(())
}

/// Parse crawler output, dropping malformed records with a warning. Returns
/// the valid recipes and the skip count.
fn read_records(path: &Path, format: &str) -> Result<(Vec<Recipe>, usize)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let values: Vec<serde_json::Value> = match format {
        "json" => serde_json::from_str(&content).context("Failed to parse JSON array")?,
        "jsonl" => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match serde_json::from_str(line) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Skipping unparsable line {}: {}", n + 1, e);
                    None
                }
            })
            .collect(),
        other => anyhow::bail!("Unknown format: {}", other),
    };

    let mut recipes = Vec::new();
    let mut skipped = 0;
    for value in values {
        match serde_json::from_value::<Recipe>(value) {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                skipped += 1;
            }
        }
    }

    Ok((recipes, skipped))
}
