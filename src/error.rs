use thiserror::Error;

/// Failures while turning a file into observations.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot open workbook: {0}")]
    Workbook(String),

    #[error("no valid rows found, expected Label,Value")]
    NoObservations,
}

/// Failures of the narrative service. These never leave the narrative
/// module; callers get fallback text instead.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("API key not configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
