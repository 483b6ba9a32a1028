//! vanilla-greeks: command line drivers for the European option engines.
//!
//! # Commands
//!
//! - `vanilla-greeks compare --spots 25,45,65` - Closed form against Monte Carlo
//! - `vanilla-greeks straddle --spots 45,55 [--concurrent]` - Call plus put batch
//! - `vanilla-greeks bounds --spots 25,50,75` - No-arbitrage bound check
//!
//! Option and simulation parameters come from `vanilla-greeks.toml` (if
//! present), then `GREEKS_*` environment variables, then the flags below.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricer_core::types::Greek;
use pricer_models::instruments::OptionKind;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::Format;
use config::{CliOverrides, LogLevel, DEFAULT_CONFIG_FILE};

/// European option pricing: Black-Scholes and Monte Carlo Greeks
#[derive(Parser)]
#[command(name = "vanilla-greeks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Strike price
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Annualised volatility
    #[arg(long, global = true)]
    volatility: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(long, global = true)]
    rate: Option<f64>,

    /// Time to maturity in years
    #[arg(long, global = true)]
    maturity: Option<f64>,

    /// Monte Carlo draws per pricing call
    #[arg(short = 'n', long, global = true)]
    iterations: Option<usize>,

    /// Seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare closed-form and Monte Carlo Greeks
    Compare {
        /// Comma-separated spot prices
        #[arg(short, long, value_delimiter = ',', required = true)]
        spots: Vec<f64>,

        /// Option type (call or put)
        #[arg(short, long, default_value = "call")]
        kind: OptionKind,

        /// Comma-separated Greeks besides price (default: all)
        #[arg(short, long, value_delimiter = ',')]
        greeks: Vec<Greek>,
    },

    /// Price a call plus put straddle as a simulation batch
    Straddle {
        /// Comma-separated spot prices
        #[arg(short, long, value_delimiter = ',', required = true)]
        spots: Vec<f64>,

        /// Comma-separated Greeks besides price (default: all)
        #[arg(short, long, value_delimiter = ',')]
        greeks: Vec<Greek>,

        /// Run the legs on asynchronous workers
        #[arg(long)]
        concurrent: bool,
    },

    /// Check closed-form prices against no-arbitrage bounds
    Bounds {
        /// Comma-separated spot prices
        #[arg(short, long, value_delimiter = ',', required = true)]
        spots: Vec<f64>,

        /// Option type (call or put)
        #[arg(short, long, default_value = "call")]
        kind: OptionKind,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            strike: self.strike,
            volatility: self.volatility,
            rate: self.rate,
            maturity: self.maturity,
            iterations: self.iterations,
            seed: self.seed,
            log_level: self.log_level,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// An empty list means every Greek.
fn requested(greeks: Vec<Greek>) -> Vec<Greek> {
    if greeks.is_empty() {
        Greek::ALL.to_vec()
    } else {
        greeks
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let config = config::build_config(&path, explicit, &cli.overrides())?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    };
    init_tracing(level.as_filter_str());

    info!("Starting vanilla-greeks");
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Compare {
            spots,
            kind,
            greeks,
        } => commands::compare::run(&config, kind, &spots, &requested(greeks), cli.format),
        Commands::Straddle {
            spots,
            greeks,
            concurrent,
        } => commands::straddle::run(&config, &spots, &requested(greeks), concurrent, cli.format),
        Commands::Bounds { spots, kind } => commands::bounds::run(&config, kind, &spots, cli.format),
    }
}
