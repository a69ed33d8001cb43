use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketMapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Acquisition error: {0}")]
    Acquisition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
