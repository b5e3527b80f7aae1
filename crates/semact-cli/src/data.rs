//! Dataset file loading, engine construction, and write-back.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use semact::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Load a dataset file and build an engine over it, with a spinner while
/// the indices embed.
pub async fn load_engine(path: &str) -> Result<ActionEngine> {
    let dataset = load_dataset(path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "indexing {} collections ({} records)...",
        dataset.len(),
        dataset.record_count()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut engine = ActionEngine::new(Arc::new(HashEmbedder::default()));
    engine.load_schema(dataset).await?;

    spinner.finish_and_clear();
    Ok(engine)
}

/// Read and parse the dataset file.
pub fn load_dataset(path: &str) -> Result<Dataset> {
    if !Path::new(path).exists() {
        bail!("Dataset file not found: {path}");
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Write the engine's live dataset back to the file it came from.
pub fn save_dataset(path: &str, dataset: &Dataset) -> Result<()> {
    let text = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, text).with_context(|| format!("writing {path}"))
}
