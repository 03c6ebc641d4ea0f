//! Error types for the panel core
//!
//! None of these escape the components that produce them: storage failures
//! degrade to in-memory sizing and provider failures degrade to a fallback
//! panel state. They exist so the degraded paths can be logged and tested.

use thiserror::Error;

/// Failure reading or writing the persistent key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled, missing, or over quota
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents could not be (de)serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Abnormal termination of a panel view descriptor subscription
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("panel view stream failed: {0}")]
    StreamFailed(String),

    /// Every sender for the subscription was dropped
    #[error("panel view stream closed")]
    Disconnected,

    #[error("could not subscribe to panel views: {0}")]
    SubscribeFailed(String),
}
