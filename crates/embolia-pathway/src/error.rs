use embolia_core::error::CoreError;
use thiserror::Error;

use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum PathwayError {
    #[error("cannot move from {from} to {to}: entry condition not met")]
    StageNotReachable { from: Stage, to: Stage },

    #[error("already at the first stage")]
    NoPreviousStage,

    #[error("no stage after {0}")]
    NoNextStage(Stage),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
