use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("unknown score: {0}")]
    UnknownScore(String),

    #[error("policy_version {found} is newer than this build supports ({supported})")]
    UnsupportedPolicyVersion { found: u32, supported: u32 },

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
