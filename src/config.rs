use clap::Parser;
use std::path::Path;

/// Evaluate one finalized event against a league's scoring rules
#[derive(Parser, Debug, Clone)]
#[command(name = "league-scoring", version, about)]
pub struct Config {
    /// JSON file with the event batch (result plus every bet on it)
    #[arg(long, env = "SCORING_INPUT")]
    pub input: String,

    /// JSON file with the league's rule configuration
    #[arg(long, env = "SCORING_RULES")]
    pub rules: String,

    /// SQLite database the awarded points are written to
    #[arg(long, env = "DATABASE_PATH", default_value = "league_points.db")]
    pub database_path: String,

    /// Evaluate and print, but do not write points
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Number of league standings to log after storing points
    #[arg(long, env = "STANDINGS_LIMIT", default_value = "10")]
    pub standings_limit: i64,

    /// Pretty-print the JSON output
    #[arg(long, default_value = "false")]
    pub pretty: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !Path::new(&self.input).is_file() {
            anyhow::bail!("input file {} does not exist", self.input);
        }
        if !Path::new(&self.rules).is_file() {
            anyhow::bail!("rules file {} does not exist", self.rules);
        }
        if self.standings_limit < 0 {
            anyhow::bail!("STANDINGS_LIMIT must be >= 0");
        }
        if !self.dry_run && self.database_path.trim().is_empty() {
            anyhow::bail!("DATABASE_PATH is required unless --dry-run is set");
        }
        Ok(())
    }
}
