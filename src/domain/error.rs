//! Domain error types.

/// Top-level error type for stocksim.
#[derive(Debug, thiserror::Error)]
pub enum StocksimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("{left} has {left_len} values but {right} has {right_len}")]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("invalid window {window}: must be at least 1")]
    InvalidWindow { window: usize },

    #[error("weights must have one entry per window day: expected {expected}, got {actual}")]
    WeightLength { expected: usize, actual: usize },

    #[error("invalid weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("unknown oscillator '{name}' (expected 'stochastic' or 'rsi')")]
    UnknownOscillator { name: String },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error("ledger error: {reason}")]
    Ledger { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StocksimError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        StocksimError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&StocksimError> for std::process::ExitCode {
    fn from(err: &StocksimError) -> Self {
        let code: u8 = match err {
            StocksimError::Io(_) => 1,
            StocksimError::ConfigParse { .. }
            | StocksimError::ConfigMissing { .. }
            | StocksimError::ConfigInvalid { .. } => 2,
            StocksimError::MissingParameter { .. }
            | StocksimError::LengthMismatch { .. }
            | StocksimError::InvalidParameter { .. }
            | StocksimError::InvalidWindow { .. }
            | StocksimError::WeightLength { .. }
            | StocksimError::InvalidWeights { .. }
            | StocksimError::UnknownOscillator { .. } => 3,
            StocksimError::Data { .. } | StocksimError::Ledger { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
