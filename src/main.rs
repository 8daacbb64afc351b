use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::info;

use league_scoring::config::Config;
use league_scoring::scoring::{LeagueRules, RawRuleSetting};
use league_scoring::store::PointsStore;
use league_scoring::{evaluate_event, EventBatch};

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let raw_rules: Vec<RawRuleSetting> = serde_json::from_str(
        &fs::read_to_string(&config.rules)
            .with_context(|| format!("Failed to read rules file {}", config.rules))?,
    )
    .context("Failed to parse league rules")?;
    let league = LeagueRules::resolve(&raw_rules).context("Invalid league configuration")?;
    info!("Loaded {} league rule(s)", league.rules.len());

    let batch: EventBatch = serde_json::from_str(
        &fs::read_to_string(&config.input)
            .with_context(|| format!("Failed to read event file {}", config.input))?,
    )
    .context("Failed to parse event batch")?;

    let scores = evaluate_event(&batch, &league)
        .with_context(|| format!("Evaluation of {} failed", batch.key()))?;
    for (user_id, points) in scores.user_totals() {
        info!("User {} earned {} point(s) on {}", user_id, points, scores.event_key);
    }

    if config.dry_run {
        info!("🟡 DRY RUN mode – points for {} are not stored", scores.event_key);
    } else {
        let store = PointsStore::open(&config.database_path)?;
        info!("Database opened: {}", config.database_path);
        store.replace_event_points(&scores)?;
        for (place, standing) in store.standings(config.standings_limit)?.iter().enumerate() {
            info!("#{} user {}: {} point(s)", place + 1, standing.user_id, standing.points);
        }
    }

    let output = if config.pretty {
        serde_json::to_string_pretty(&scores)?
    } else {
        serde_json::to_string(&scores)?
    };
    println!("{}", output);

    Ok(())
}
