use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read dashboard settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid dashboard setting: {0}")]
    Invalid(String),
}
