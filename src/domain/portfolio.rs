//! Cash balance and share holdings.

use std::collections::HashMap;

use super::error::{PapertradeError, TradeError};
use super::market::Market;

/// Which side of the book a fill was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// An executed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub side: Side,
    pub symbol: String,
    pub quantity: u32,
    pub price: f64,
    /// Cash debited on a buy or credited on a sell.
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    holdings: HashMap<String, u32>,
}

impl Portfolio {
    pub fn new(initial_balance: f64) -> Self {
        Portfolio {
            cash: initial_balance,
            holdings: HashMap::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Shares held of `symbol`, zero when absent.
    pub fn quantity(&self, symbol: &str) -> u32 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    pub fn is_holding(&self, symbol: &str) -> bool {
        self.holdings.contains_key(symbol)
    }

    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Holdings sorted by symbol.
    pub fn holdings(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = self
            .holdings
            .iter()
            .map(|(symbol, &qty)| (symbol.as_str(), qty))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Buy `quantity` shares at `price`. All-or-nothing: on error nothing
    /// changes.
    pub fn buy(&mut self, symbol: &str, quantity: u32, price: f64) -> Result<Fill, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        let held = self.quantity(symbol);
        let new_held = held
            .checked_add(quantity)
            .ok_or_else(|| TradeError::HoldingOverflow {
                symbol: symbol.to_string(),
                quantity,
                held,
            })?;
        let cost = quantity as f64 * price;
        if self.cash < cost {
            return Err(TradeError::InsufficientFunds {
                symbol: symbol.to_string(),
                quantity,
                cost,
                available: self.cash,
            });
        }

        self.cash -= cost;
        self.holdings.insert(symbol.to_string(), new_held);

        Ok(Fill {
            side: Side::Buy,
            symbol: symbol.to_string(),
            quantity,
            price,
            amount: cost,
        })
    }

    /// Sell `quantity` shares at `price`. The holding is removed when it
    /// reaches zero.
    pub fn sell(&mut self, symbol: &str, quantity: u32, price: f64) -> Result<Fill, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        let held = self.quantity(symbol);
        if held < quantity {
            return Err(TradeError::InsufficientShares {
                symbol: symbol.to_string(),
                quantity,
                held,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            self.holdings.remove(symbol);
        } else {
            self.holdings.insert(symbol.to_string(), remaining);
        }
        let proceeds = quantity as f64 * price;
        self.cash += proceeds;

        Ok(Fill {
            side: Side::Sell,
            symbol: symbol.to_string(),
            quantity,
            price,
            amount: proceeds,
        })
    }

    /// Cash plus every holding marked at its current market price.
    pub fn valuate(&self, market: &Market) -> Result<f64, PapertradeError> {
        let mut total = self.cash;
        for (symbol, &qty) in &self.holdings {
            let inst = market
                .lookup(symbol)
                .ok_or_else(|| PapertradeError::MissingInstrument {
                    symbol: symbol.clone(),
                })?;
            total += inst.market_value(qty);
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::Instrument;
    use approx::assert_relative_eq;

    #[test]
    fn new_portfolio() {
        let p = Portfolio::new(10_000.0);
        assert_relative_eq!(p.cash(), 10_000.0);
        assert_eq!(p.holding_count(), 0);
    }

    #[test]
    fn buy_deducts_cost_and_adds_shares() {
        let mut p = Portfolio::new(10_000.0);
        let fill = p.buy("AAPL", 10, 150.0).unwrap();

        assert_eq!(fill.side, Side::Buy);
        assert_eq!(fill.quantity, 10);
        assert_relative_eq!(fill.amount, 1500.0);
        assert_relative_eq!(p.cash(), 8500.0);
        assert_eq!(p.quantity("AAPL"), 10);
        assert_eq!(p.holdings(), vec![("AAPL", 10)]);
    }

    #[test]
    fn repeated_buys_accumulate() {
        let mut p = Portfolio::new(10_000.0);
        p.buy("MSFT", 2, 300.0).unwrap();
        p.buy("MSFT", 3, 300.0).unwrap();
        assert_eq!(p.quantity("MSFT"), 5);
        assert_relative_eq!(p.cash(), 8500.0);
    }

    #[test]
    fn buy_exact_balance_succeeds() {
        let mut p = Portfolio::new(300.0);
        p.buy("MSFT", 1, 300.0).unwrap();
        assert_eq!(p.cash(), 0.0);
    }

    #[test]
    fn buy_insufficient_funds_leaves_state() {
        let mut p = Portfolio::new(10_000.0);
        let before = p.clone();
        let err = p.buy("GOOGL", 1000, 2800.0).unwrap_err();

        assert!(matches!(err, TradeError::InsufficientFunds { quantity: 1000, .. }));
        assert_eq!(p, before);
    }

    #[test]
    fn buy_past_max_holding_rejected() {
        let mut p = Portfolio::new(1e13);
        p.buy("AAPL", u32::MAX, 1.0).unwrap();
        let before = p.clone();

        let err = p.buy("AAPL", 1, 1.0).unwrap_err();
        assert_eq!(
            err,
            TradeError::HoldingOverflow {
                symbol: "AAPL".into(),
                quantity: 1,
                held: u32::MAX,
            }
        );
        assert_eq!(p, before);
        assert_eq!(p.quantity("AAPL"), u32::MAX);
    }

    #[test]
    fn buy_zero_quantity_rejected() {
        let mut p = Portfolio::new(10_000.0);
        assert_eq!(p.buy("AAPL", 0, 150.0), Err(TradeError::ZeroQuantity));
        assert!(!p.is_holding("AAPL"));
    }

    #[test]
    fn sell_all_removes_entry() {
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 10, 150.0).unwrap();
        let fill = p.sell("AAPL", 10, 150.0).unwrap();

        assert_eq!(fill.side, Side::Sell);
        assert_relative_eq!(fill.amount, 1500.0);
        assert_relative_eq!(p.cash(), 10_000.0);
        assert!(!p.is_holding("AAPL"));
        assert!(p.holdings().is_empty());
    }

    #[test]
    fn partial_sell_keeps_remainder() {
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 10, 150.0).unwrap();
        p.sell("AAPL", 4, 160.0).unwrap();
        assert_eq!(p.quantity("AAPL"), 6);
        assert_relative_eq!(p.cash(), 8500.0 + 640.0);
    }

    #[test]
    fn oversell_leaves_state() {
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 3, 150.0).unwrap();
        let before = p.clone();
        let err = p.sell("AAPL", 4, 150.0).unwrap_err();
        assert_eq!(
            err,
            TradeError::InsufficientShares {
                symbol: "AAPL".into(),
                quantity: 4,
                held: 3,
            }
        );
        assert_eq!(p, before);
    }

    #[test]
    fn sell_unheld_symbol_fails() {
        let mut p = Portfolio::new(10_000.0);
        let err = p.sell("MSFT", 1, 300.0).unwrap_err();
        assert!(matches!(err, TradeError::InsufficientShares { held: 0, .. }));
        assert!(!p.is_holding("MSFT"));
    }

    #[test]
    fn sell_zero_quantity_rejected() {
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 1, 150.0).unwrap();
        assert_eq!(p.sell("AAPL", 0, 150.0), Err(TradeError::ZeroQuantity));
        assert_eq!(p.quantity("AAPL"), 1);
    }

    #[test]
    fn valuate_uses_current_market_prices() {
        let market = Market::default_listing();
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 10, 150.0).unwrap();
        p.buy("MSFT", 5, 300.0).unwrap();

        let value = p.valuate(&market).unwrap();
        assert_relative_eq!(value, 7000.0 + 1500.0 + 1500.0);
        assert_relative_eq!(value, p.valuate(&market).unwrap());
    }

    #[test]
    fn valuate_marks_at_market_not_trade_price() {
        let market = Market::default_listing();
        let mut p = Portfolio::new(10_000.0);
        p.buy("AAPL", 10, 100.0).unwrap();
        assert_relative_eq!(p.valuate(&market).unwrap(), 9000.0 + 1500.0);
    }

    #[test]
    fn valuate_missing_instrument_is_error() {
        let market =
            Market::from_instruments(vec![Instrument::new("AAPL", "Apple Inc.", 150.0)]).unwrap();
        let mut p = Portfolio::new(10_000.0);
        p.buy("GONE", 1, 10.0).unwrap();
        match p.valuate(&market) {
            Err(PapertradeError::MissingInstrument { symbol }) => assert_eq!(symbol, "GONE"),
            other => panic!("expected missing instrument, got {other:?}"),
        }
    }

    #[test]
    fn holdings_sorted_by_symbol() {
        let mut p = Portfolio::new(100_000.0);
        p.buy("MSFT", 1, 300.0).unwrap();
        p.buy("AAPL", 2, 150.0).unwrap();
        p.buy("GOOGL", 3, 2800.0).unwrap();
        assert_eq!(p.holdings(), vec![("AAPL", 2), ("GOOGL", 3), ("MSFT", 1)]);
    }
}
