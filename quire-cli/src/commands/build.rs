//! Build command implementation

use crate::recipe::Recipe;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Build an EPUB described by a recipe file
pub fn build(recipe: &str, output: &str) -> Result<()> {
    let recipe_path = Path::new(recipe);
    let base_dir = recipe_path.parent().unwrap_or_else(|| Path::new("."));

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading recipe...");
    let recipe = Recipe::load(recipe_path)?;

    pb.set_message("Collecting content...");
    let doc = recipe.into_document(base_dir)?;

    tracing::info!(
        "Collected {} manifest items and {} spine entries",
        doc.manifest().len(),
        doc.spine().item_refs().len()
    );

    pb.set_message("Generating package...");
    let written = doc
        .generate(output)
        .with_context(|| format!("Failed to generate {}", output))?;

    let title = doc
        .metadata()
        .dc_values("title")
        .next()
        .map(|item| item.value.clone())
        .unwrap_or_default();
    pb.finish_with_message(format!("Built '{}' -> {}", title, written.display()));

    Ok(())
}
