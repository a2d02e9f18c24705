//! Interactive menu loop.
//!
//! A [`Session`] owns the market, the portfolio and the randomness source and
//! talks to the user over any `BufRead`/`Write` pair, so the whole loop can be
//! driven from in-memory buffers.

use std::io::{BufRead, Write};

use log::{info, warn};
use rand::Rng;

use crate::domain::error::PapertradeError;
use crate::domain::market::Market;
use crate::domain::portfolio::{Fill, Portfolio, Side};

pub const MENU: &str = "\
--- Stock Trading Platform ---
1. View Market Data
2. Buy Stock
3. Sell Stock
4. View Portfolio
5. Update Market Prices
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewMarket,
    Buy,
    Sell,
    ViewPortfolio,
    UpdatePrices,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<i64>().ok()? {
            1 => Some(MenuChoice::ViewMarket),
            2 => Some(MenuChoice::Buy),
            3 => Some(MenuChoice::Sell),
            4 => Some(MenuChoice::ViewPortfolio),
            5 => Some(MenuChoice::UpdatePrices),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parse a share count typed by the user. Zero, negative and non-numeric
/// input is rejected.
pub fn parse_quantity(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|&q| q > 0)
}

pub fn fill_message(fill: &Fill) -> String {
    match fill.side {
        Side::Buy => format!("Bought {} shares of {}", fill.quantity, fill.symbol),
        Side::Sell => format!("Sold {} shares of {}", fill.quantity, fill.symbol),
    }
}

pub struct Session<R, W, G> {
    market: Market,
    portfolio: Portfolio,
    rng: G,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, G: Rng> Session<R, W, G> {
    pub fn new(market: Market, portfolio: Portfolio, rng: G, input: R, output: W) -> Self {
        Session {
            market,
            portfolio,
            rng,
            input,
            output,
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the exit command or end of input.
    pub fn run(&mut self) -> Result<(), PapertradeError> {
        info!(
            "session started: {} instruments, cash {:.2}",
            self.market.list_all().count(),
            self.portfolio.cash()
        );
        while self.step()? == Flow::Continue {}
        info!("session ended: cash {:.2}", self.portfolio.cash());
        Ok(())
    }

    /// Show the menu, read one selection and dispatch it.
    pub fn step(&mut self) -> Result<Flow, PapertradeError> {
        writeln!(self.output)?;
        writeln!(self.output, "{MENU}")?;
        let Some(line) = self.prompt("Choose an option: ")? else {
            return self.end_of_input();
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::ViewMarket) => self.show_market()?,
            Some(MenuChoice::Buy) => return self.trade(Side::Buy),
            Some(MenuChoice::Sell) => return self.trade(Side::Sell),
            Some(MenuChoice::ViewPortfolio) => self.show_portfolio()?,
            Some(MenuChoice::UpdatePrices) => {
                self.market.update_prices(&mut self.rng);
                writeln!(self.output, "Market prices updated.")?;
            }
            Some(MenuChoice::Exit) => {
                writeln!(self.output, "Exiting Stock Trading Platform.")?;
                return Ok(Flow::Exit);
            }
            None => {
                warn!("invalid menu selection {:?}", line.trim());
                writeln!(self.output, "Invalid choice. Please choose again.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, PapertradeError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn end_of_input(&mut self) -> Result<Flow, PapertradeError> {
        writeln!(self.output)?;
        writeln!(self.output, "Exiting Stock Trading Platform.")?;
        info!("input closed");
        Ok(Flow::Exit)
    }

    fn show_market(&mut self) -> Result<(), PapertradeError> {
        writeln!(self.output, "Stock Market Data:")?;
        for inst in self.market.list_all() {
            writeln!(
                self.output,
                "{} ({}): ${:.2}",
                inst.name, inst.symbol, inst.price
            )?;
        }
        Ok(())
    }

    fn trade(&mut self, side: Side) -> Result<Flow, PapertradeError> {
        let verb = match side {
            Side::Buy => "buy",
            Side::Sell => "sell",
        };

        let Some(raw) = self.prompt(&format!("Enter stock symbol to {verb}: "))? else {
            return self.end_of_input();
        };
        let symbol = raw.trim().to_uppercase();
        let Some(price) = self.market.lookup(&symbol).map(|i| i.price) else {
            writeln!(self.output, "Stock not found.")?;
            return Ok(Flow::Continue);
        };

        let Some(raw) = self.prompt(&format!("Enter quantity to {verb}: "))? else {
            return self.end_of_input();
        };
        let Some(quantity) = parse_quantity(&raw) else {
            writeln!(self.output, "Quantity must be a positive whole number.")?;
            return Ok(Flow::Continue);
        };

        let result = match side {
            Side::Buy => self.portfolio.buy(&symbol, quantity, price),
            Side::Sell => self.portfolio.sell(&symbol, quantity, price),
        };
        match result {
            Ok(fill) => {
                info!(
                    "{:?} {} {} @ {:.2}, cash now {:.2}",
                    fill.side,
                    fill.quantity,
                    fill.symbol,
                    fill.price,
                    self.portfolio.cash()
                );
                writeln!(self.output, "{}", fill_message(&fill))?;
            }
            Err(e) => {
                warn!("trade rejected: {e:?}");
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_portfolio(&mut self) -> Result<(), PapertradeError> {
        writeln!(self.output, "Portfolio:")?;
        writeln!(self.output, "Cash Balance: ${:.2}", self.portfolio.cash())?;
        writeln!(self.output, "Stock Holdings:")?;
        for (symbol, quantity) in self.portfolio.holdings() {
            let inst = self
                .market
                .lookup(symbol)
                .ok_or_else(|| PapertradeError::MissingInstrument {
                    symbol: symbol.to_string(),
                })?;
            writeln!(
                self.output,
                "{} ({}): {} shares @ ${:.2} each",
                inst.name, symbol, quantity, inst.price
            )?;
        }
        let total = self.portfolio.valuate(&self.market)?;
        writeln!(self.output, "Total Portfolio Value: ${total:.2}")?;
        Ok(())
    }
}
