//! Domain error types.

/// Top-level error type for rotor.
#[derive(Debug, thiserror::Error)]
pub enum RotorError {
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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("universe is empty after validation")]
    EmptyUniverse,

    #[error("insufficient history for {symbol}: have {observations} observations, need {required}")]
    InsufficientHistory {
        symbol: String,
        observations: usize,
        required: usize,
    },

    #[error("no observations for reference series {symbol} in the simulation window")]
    MissingReferenceData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RotorError> for std::process::ExitCode {
    fn from(err: &RotorError) -> Self {
        let code: u8 = match err {
            RotorError::Io(_) => 1,
            RotorError::ConfigParse { .. }
            | RotorError::ConfigMissing { .. }
            | RotorError::ConfigInvalid { .. } => 2,
            RotorError::Data { .. } => 3,
            RotorError::NoData { .. } | RotorError::EmptyUniverse => 4,
            RotorError::InsufficientHistory { .. } | RotorError::MissingReferenceData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
