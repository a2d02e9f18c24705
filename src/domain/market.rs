//! The fixed market listing and its random-walk price update.

use log::debug;
use rand::Rng;

use super::error::PapertradeError;
use super::instrument::Instrument;

/// Largest absolute price move, in percent, applied per update.
pub const MAX_CHANGE_PCT: f64 = 1.0;

/// Instruments keyed by symbol. Membership is fixed once built; iteration
/// follows insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    instruments: Vec<Instrument>,
}

impl Market {
    /// Build a market from an explicit listing. Symbols must be unique.
    pub fn from_instruments(instruments: Vec<Instrument>) -> Result<Self, PapertradeError> {
        for (i, inst) in instruments.iter().enumerate() {
            if instruments[..i].iter().any(|o| o.symbol == inst.symbol) {
                return Err(PapertradeError::DuplicateInstrument {
                    symbol: inst.symbol.clone(),
                });
            }
        }
        Ok(Market { instruments })
    }

    /// The built-in four-stock listing.
    pub fn default_listing() -> Self {
        Market {
            instruments: vec![
                Instrument::new("AAPL", "Apple Inc.", 150.00),
                Instrument::new("GOOGL", "Alphabet Inc.", 2800.00),
                Instrument::new("AMZN", "Amazon.com Inc.", 3400.00),
                Instrument::new("MSFT", "Microsoft Corp.", 300.00),
            ],
        }
    }

    /// Exact, case-sensitive symbol match.
    pub fn lookup(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Move every price by an independent uniform draw in
    /// [-MAX_CHANGE_PCT, +MAX_CHANGE_PCT] percent. Prices are not floored.
    pub fn update_prices<R: Rng>(&mut self, rng: &mut R) {
        for inst in &mut self.instruments {
            let change_pct = rng.gen_range(-MAX_CHANGE_PCT..=MAX_CHANGE_PCT);
            let before = inst.price;
            inst.apply_change_pct(change_pct);
            debug!(
                "{}: {:.4} -> {:.4} ({:+.4}%)",
                inst.symbol, before, inst.price, change_pct
            );
        }
    }
}
