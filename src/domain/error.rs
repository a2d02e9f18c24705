//! Domain error types.

/// A trade the portfolio refused to execute. State is untouched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("Insufficient balance to buy {quantity} shares of {symbol}")]
    InsufficientFunds {
        symbol: String,
        quantity: u32,
        cost: f64,
        available: f64,
    },

    #[error("Insufficient shares to sell {quantity} shares of {symbol}")]
    InsufficientShares {
        symbol: String,
        quantity: u32,
        held: u32,
    },

    #[error("Cannot hold more than {max} shares of {symbol}", max = u32::MAX)]
    HoldingOverflow {
        symbol: String,
        quantity: u32,
        held: u32,
    },

    #[error("quantity must be positive")]
    ZeroQuantity,
}

/// Top-level error type for papertrade.
#[derive(Debug, thiserror::Error)]
pub enum PapertradeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("duplicate instrument symbol {symbol}")]
    DuplicateInstrument { symbol: String },

    #[error("held symbol {symbol} is not listed on the market")]
    MissingInstrument { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PapertradeError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            PapertradeError::Io(_) => 1,
            PapertradeError::ConfigParse { .. }
            | PapertradeError::ConfigInvalid { .. }
            | PapertradeError::DuplicateInstrument { .. } => 2,
            PapertradeError::MissingInstrument { .. } => 3,
        }
    }
}

impl From<&PapertradeError> for std::process::ExitCode {
    fn from(err: &PapertradeError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
