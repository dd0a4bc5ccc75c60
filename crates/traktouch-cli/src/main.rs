//! traktouch CLI: configuration tooling and offline engine replay.

mod replay;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use traktouch_engine::{scroll_amount, setup, Config};

use crate::replay::Trace;

#[derive(Parser)]
#[command(
    name = "traktouch",
    about = "Touch screen input correction for legacy desktop hosts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and validate configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the pan-to-scroll acceleration curve.
    Curve {
        /// Largest pan delta to print.
        #[arg(short, long, default_value_t = 40)]
        max: i32,

        /// Step between printed deltas.
        #[arg(short, long, default_value_t = 1)]
        step: usize,
    },

    /// Run a recorded event trace through the engine and print what it does.
    Replay {
        /// Trace file (TOML).
        trace: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration.
    Default,
    /// Print the effective configuration.
    Show,
    /// Validate a configuration file.
    Check {
        /// File to check; defaults to --config or the default location.
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Default => {
                print!("{}", toml::to_string_pretty(&Config::default())?);
            }
            ConfigAction::Show => {
                let config = setup::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Check { path } => {
                let path = path.or(cli.config);
                setup::load_config(path.as_deref())?;
                println!("configuration OK");
            }
        },
        Commands::Curve { max, step } => {
            let config = setup::load_config(cli.config.as_deref())?;
            println!("{:>6}  {:>7}", "delta", "wheel");
            for delta in (0..=max.max(0)).step_by(step.max(1)) {
                println!("{delta:>6}  {:>7}", scroll_amount(delta, &config.scroll));
            }
        }
        Commands::Replay { trace } => {
            let config = setup::load_config(cli.config.as_deref())?;
            let content = std::fs::read_to_string(&trace)
                .with_context(|| format!("failed to read {}", trace.display()))?;
            let trace: Trace = toml::from_str(&content).context("failed to parse trace")?;
            tracing::info!(steps = trace.steps.len(), "replaying trace");

            for (index, effects) in replay::replay(&trace, config)?.iter().enumerate() {
                for effect in effects {
                    println!("{index:>4}  {effect}");
                }
            }
        }
    }

    Ok(())
}
