//! Show index statistics for the dataset.

use crate::data::load_engine;
use anyhow::Result;
use colored::Colorize;

pub async fn run(data: &str) -> Result<()> {
    let engine = load_engine(data).await?;
    let stats = engine.index_stats();

    println!("{} Index statistics", "→".blue());
    println!();
    for (name, collection) in &stats.collections {
        println!(
            "  {} {} examples, {} values",
            name.white().bold(),
            collection.examples.to_string().cyan(),
            collection.values.to_string().cyan()
        );
    }
    println!();
    println!(
        "{} {} example phrases, {} indexed values",
        "✓".green(),
        stats.examples.to_string().cyan(),
        stats.values.to_string().cyan()
    );

    Ok(())
}
