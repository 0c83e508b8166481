//! Domain error types.

/// Top-level error type for marketscope.
#[derive(Debug, thiserror::Error)]
pub enum MarketscopeError {
    #[error("quote provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    #[error("quote response format error: {reason}")]
    ProviderFormat { reason: String },

    #[error("ledger error in {file}: {reason}")]
    Ledger { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("chart output error: {reason}")]
    ChartOutput { reason: String },

    #[error("unknown ticker group: {name}")]
    UnknownGroup { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MarketscopeError> for std::process::ExitCode {
    fn from(err: &MarketscopeError) -> Self {
        let code: u8 = match err {
            MarketscopeError::Io(_) => 1,
            MarketscopeError::ConfigParse { .. } | MarketscopeError::ConfigMissing { .. } => 2,
            MarketscopeError::Provider { .. } | MarketscopeError::ProviderFormat { .. } => 3,
            MarketscopeError::Ledger { .. } => 4,
            MarketscopeError::ChartOutput { .. } | MarketscopeError::UnknownGroup { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
