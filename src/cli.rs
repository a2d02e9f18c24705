//! CLI definition and dispatch.

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::PapertradeError;
use crate::domain::portfolio::Portfolio;
use crate::domain::settings::{self, Settings, check_balance};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "papertrade", about = "Interactive stock trading simulator")]
pub struct Cli {
    /// INI file with [portfolio], [market] and [instruments] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Starting cash balance
    #[arg(long, value_parser = parse_balance)]
    pub initial_balance: Option<f64>,
    /// Seed for market price updates
    #[arg(long)]
    pub seed: Option<u64>,
    /// Log trades and session events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_balance(s: &str) -> Result<f64, String> {
    check_balance(s.trim().parse::<f64>().ok()).map_err(str::to_string)
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match resolve_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match run_session(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, PapertradeError> {
    FileConfigAdapter::from_file(path).map_err(|e| PapertradeError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Built-in defaults, then the config file, then command-line flags.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, PapertradeError> {
    let mut settings = match &cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            let adapter = load_config(path)?;
            settings::load_settings(&adapter)?
        }
        None => Settings::default(),
    };

    if let Some(balance) = cli.initial_balance {
        settings.initial_balance = balance;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

fn run_session(settings: &Settings) -> Result<(), PapertradeError> {
    let market = settings.build_market()?;
    let portfolio = Portfolio::new(settings.initial_balance);
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(market, portfolio, rng, stdin.lock(), stdout.lock());
    session.run()
}
