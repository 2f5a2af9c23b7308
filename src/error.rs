use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetmapError>;

#[derive(Error, Debug)]
pub enum NetmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Text generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("An insight request is already in flight")]
    RequestInFlight,

    #[error("No API key configured (set NETMAP_INSIGHTS__API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,
}
