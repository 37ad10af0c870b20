//! Cricket Scorer CLI
//!
//! Replays scoring scripts (JSON arrays of scoring commands), prints
//! scorecards from save files and dumps the match JSON Schema.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cricket_core::analysis::MatchMetrics;
use cricket_core::config::{self, ScoringConfig};
use cricket_core::{api, SaveManager, ScoringCommand, ScoringSession};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `CRICKET_LOG=cricket_core=debug`
const LOG_ENV: &str = "CRICKET_LOG";

#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Ball-by-ball cricket scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a scoring script to a fresh match and print the result
    Replay {
        /// JSON array of scoring commands
        #[arg(long)]
        script: PathBuf,

        /// Write the final match to this save file
        #[arg(long)]
        out: Option<PathBuf>,

        /// Format policy JSON (defaults to $CRICKET_POLICY_PATH, then built-in)
        #[arg(long)]
        policy: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the scorecard stored in a save file
    Show {
        #[arg(long)]
        save: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the JSON Schema of the match document
    Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, out, policy, format } => {
            let config = load_config(policy.as_deref())?;
            let session = replay_script(&script, config)?;

            if let Some(out) = out {
                SaveManager::save_to_path(&out, &session.to_save())
                    .with_context(|| format!("failed to write save {}", out.display()))?;
                info!(path = %out.display(), "match saved");
            }
            println!("{}", render(&session, format)?);
        }

        Commands::Show { save, format } => {
            let loaded = SaveManager::load_from_path(&save)
                .with_context(|| format!("failed to load save {}", save.display()))?;
            let session = ScoringSession::from_save(&loaded, ScoringConfig::default());
            println!("{}", render(&session, format)?);
        }

        Commands::Schema => {
            println!("{}", api::match_json_schema_string()?);
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_config(policy: Option<&Path>) -> Result<ScoringConfig> {
    let config = match policy {
        Some(path) => config::load_from_path(&path.to_string_lossy())?,
        None => config::load_from_env()?,
    };
    Ok(config)
}

fn replay_script(script: &Path, config: ScoringConfig) -> Result<ScoringSession> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let commands: Vec<ScoringCommand> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid scoring script {}", script.display()))?;

    let mut session = ScoringSession::with_config(config);
    session.apply_all(&commands);
    info!(commands = commands.len(), match_id = %session.current().id, "script replayed");
    Ok(session)
}

fn render(session: &ScoringSession, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report::render_scorecard(session.current())),
        OutputFormat::Json => {
            let body = serde_json::json!({
                "match": session.current(),
                "metrics": MatchMetrics::from_match(session.current()),
            });
            Ok(serde_json::to_string_pretty(&body)?)
        }
    }
}
