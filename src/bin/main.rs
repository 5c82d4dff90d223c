use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use style_overlay::config::{
    OverlaySettings, StyleTable, UnknownLabels, defaults, load_user_config, merge_settings,
    user_config_path,
};
use style_overlay::{HighlightSpan, IntervalStore, Style};

/// Build and diff style overlays from highlighter span dumps
#[derive(Parser)]
#[command(name = "style-overlay")]
#[command(version)]
#[command(about = "Build and diff style overlays from highlighter span dumps")]
struct Cli {
    /// Style configuration (default: user config, then built-in Markdown styles)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the coalesced runs for a span dump
    Build {
        /// JSON array of {"start", "end", "label"} objects
        spans: PathBuf,
    },
    /// Print the updates needed to go from one span dump to another
    Diff {
        /// Spans currently rendered
        old: PathBuf,
        /// Spans to render next
        new: PathBuf,
    },
    /// Print the built-in default configuration as TOML
    DefaultConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Build { spans } => {
            let table = StyleTable::from_settings(&load_settings(cli.config.as_deref())?);
            let mut unknown = UnknownLabels::new();
            let store = table.build_store(&read_spans(&spans)?, &mut unknown);
            for run in store.runs() {
                println!("{}", run);
            }
        }
        Commands::Diff { old, new } => {
            let table = StyleTable::from_settings(&load_settings(cli.config.as_deref())?);
            let mut unknown = UnknownLabels::new();
            let old = table.build_store(&read_spans(&old)?, &mut unknown);
            let new = table.build_store(&read_spans(&new)?, &mut unknown);
            for update in IntervalStore::diff(&old, &new, &Style::BASE) {
                println!("{}", update);
            }
        }
        Commands::DefaultConfig => {
            print!("{}", toml::to_string_pretty(&defaults::default_settings())?);
        }
    }
    Ok(())
}

/// Built-in defaults overlaid with the explicit or user config file.
///
/// A missing user config is fine; a missing explicit one is an error.
fn load_settings(explicit: Option<&Path>) -> Result<OverlaySettings, Box<dyn std::error::Error>> {
    let user = match explicit {
        Some(path) => Some(
            load_user_config(path)?
                .ok_or_else(|| format!("config file not found: {}", path.display()))?,
        ),
        None => match user_config_path() {
            Some(path) => load_user_config(&path)?,
            None => None,
        },
    };
    Ok(merge_settings(Some(defaults::default_settings()), user).unwrap_or_default())
}

fn read_spans(path: &Path) -> Result<Vec<HighlightSpan>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let spans = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
    Ok(spans)
}
