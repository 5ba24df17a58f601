use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Advisory oracle unavailable: {0}")]
    AdvisoryUnavailable(String),

    #[error("Advisory reply malformed: {0}")]
    AdvisoryMalformed(String),

    #[error("Invalid difficulty tier: {0:?}")]
    InvalidDifficulty(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
