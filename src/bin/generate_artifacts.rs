use std::path::PathBuf;

use anyhow::{Context, Result};
use precagro::data::synthetic::{generate, CROP_PROFILES, DEFAULT_SEED};
use precagro::model::loader::load_artifacts;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let generated = generate(&out_dir, DEFAULT_SEED)?;

    // Reload through the application's own loader so the written set is known-good.
    let context = load_artifacts(&generated.paths).context("reloading generated artifacts")?;
    let evaluation = context
        .evaluate(&generated.samples)
        .context("evaluating generated artifacts")?;

    println!(
        "Wrote {} samples ({} crops) to {}",
        generated.samples.len(),
        CROP_PROFILES.len(),
        generated.dataset.display()
    );
    println!(
        "Wrote artifacts to {}: {evaluation}",
        out_dir.display()
    );
    Ok(())
}
