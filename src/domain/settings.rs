//! Run settings: starting cash, RNG seed and the market listing.
//!
//! Values come from an optional INI file through [`ConfigPort`]; command-line
//! overrides are applied by the CLI on top of what is loaded here.

use crate::domain::error::PapertradeError;
use crate::domain::instrument::Instrument;
use crate::domain::market::Market;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_INITIAL_BALANCE: f64 = 10_000.00;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub initial_balance: f64,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    /// `None` uses [`Market::default_listing`].
    pub instruments: Option<Vec<Instrument>>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            seed: None,
            instruments: None,
        }
    }
}

impl Settings {
    pub fn build_market(&self) -> Result<Market, PapertradeError> {
        match &self.instruments {
            Some(list) => Market::from_instruments(list.clone()),
            None => Ok(Market::default_listing()),
        }
    }
}

/// Validate and read settings from `config`.
pub fn load_settings(config: &dyn ConfigPort) -> Result<Settings, PapertradeError> {
    let initial_balance = read_initial_balance(config)?.unwrap_or(DEFAULT_INITIAL_BALANCE);
    let seed = read_seed(config)?;
    let instruments = parse_instruments(config)?;

    Ok(Settings {
        initial_balance,
        seed,
        instruments: if instruments.is_empty() {
            None
        } else {
            Some(instruments)
        },
    })
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> PapertradeError {
    PapertradeError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn read_initial_balance(config: &dyn ConfigPort) -> Result<Option<f64>, PapertradeError> {
    let Some(raw) = config.get_string("portfolio", "initial_balance") else {
        return Ok(None);
    };
    check_balance(raw.trim().parse::<f64>().ok())
        .map(Some)
        .map_err(|reason| invalid("portfolio", "initial_balance", reason))
}

/// Shared by config and command-line values.
pub fn check_balance(value: Option<f64>) -> Result<f64, &'static str> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(_) => Err("initial_balance must be a non-negative amount"),
        None => Err("initial_balance must be a number"),
    }
}

fn read_seed(config: &dyn ConfigPort) -> Result<Option<u64>, PapertradeError> {
    let Some(raw) = config.get_string("market", "seed") else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| invalid("market", "seed", "seed must be a non-negative integer"))
}

/// `[instruments]` entries of the form `SYMBOL = Display Name, price`,
/// returned in symbol order.
fn parse_instruments(config: &dyn ConfigPort) -> Result<Vec<Instrument>, PapertradeError> {
    let mut out = Vec::new();
    for key in config.section_keys("instruments") {
        let symbol = key.trim().to_uppercase();
        let raw = config.get_string("instruments", &key).unwrap_or_default();
        let (name, price) = raw
            .rsplit_once(',')
            .ok_or_else(|| invalid("instruments", &key, "expected `Display Name, price`"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("instruments", &key, "display name is empty"));
        }
        let price = match price.trim().parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => p,
            Ok(_) => return Err(invalid("instruments", &key, "price must be non-negative")),
            Err(_) => return Err(invalid("instruments", &key, "price must be a number")),
        };
        out.push(Instrument::new(symbol, name, price));
    }
    Ok(out)
}
