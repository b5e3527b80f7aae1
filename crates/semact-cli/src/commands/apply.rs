//! Propose, execute the best candidate, and write the dataset back.

use crate::data::{load_engine, save_dataset};
use anyhow::{bail, Result};
use colored::Colorize;
use semact::prelude::*;

pub async fn run(data: &str, query: &str, dry_run: bool) -> Result<()> {
    let mut engine = load_engine(data).await?;
    let candidates = engine.propose_actions(query, DEFAULT_TOP_K).await?;

    let Some(best) = candidates.first() else {
        bail!("No candidate actions for: {query}");
    };

    println!(
        "{} {} {}",
        "→".blue(),
        best.summary.white().bold(),
        format!("({:.3})", best.score).dimmed()
    );

    if dry_run {
        println!("{} dry run, nothing executed", "•".yellow());
        return Ok(());
    }

    let outcome = engine.execute_action(best)?;
    match &outcome {
        Outcome::Records(records) => {
            for record in records {
                println!("  {}", serde_json::to_string(record)?);
            }
            println!("{} {} records", "✓".green(), records.len().to_string().cyan());
        }
        Outcome::Created(record) => {
            println!("  {}", serde_json::to_string(record)?);
            println!("{} created", "✓".green());
        }
        Outcome::Deleted(count) => {
            println!("{} deleted {}", "✓".green(), count.to_string().cyan());
        }
    }

    save_dataset(data, engine.schema())?;
    Ok(())
}
