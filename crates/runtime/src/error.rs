//! Unified error types surfaced by the runtime API.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("input event channel closed before the session ended")]
    InputChannelClosed,

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("session worker requires {missing} before building")]
    MissingCollaborator { missing: &'static str },
}
