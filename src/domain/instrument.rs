//! Tradable instruments.

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Instrument {
            symbol: symbol.into(),
            name: name.into(),
            price,
        }
    }

    /// Multiply the price by `1 + change_pct / 100`.
    pub fn apply_change_pct(&mut self, change_pct: f64) {
        self.price *= 1.0 + change_pct / 100.0;
    }

    pub fn market_value(&self, quantity: u32) -> f64 {
        quantity as f64 * self.price
    }
}
