//! Rank candidate actions for a query.

use crate::data::load_engine;
use anyhow::Result;
use colored::Colorize;

pub async fn run(data: &str, query: &str, top: usize, json: bool) -> Result<()> {
    let engine = load_engine(data).await?;
    let candidates = engine.propose_actions(query, top).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("{} No candidates for: {}", "•".yellow(), query.cyan());
        return Ok(());
    }

    println!("{} Candidates for {}:", "→".blue(), query.cyan().bold());
    println!();

    for (i, candidate) in candidates.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        let score = format!("{:.3}", candidate.score);

        println!(
            "  {} {} {}",
            rank.blue(),
            candidate.summary.white().bold(),
            format!("({score})").dimmed()
        );

        if let Some(provenance) = &candidate.resolved_from {
            println!(
                "      matched {}.{} = '{}'",
                provenance.collection, provenance.field, provenance.value
            );
        }
    }

    println!();
    println!(
        "{} {} candidates",
        "✓".green(),
        candidates.len().to_string().cyan()
    );

    Ok(())
}
