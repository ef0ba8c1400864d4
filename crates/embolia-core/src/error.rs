use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("field '{0}' is forced by another observation and cannot be edited")]
    LockedField(String),
}
