use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable audio subsystem; the engine goes inert.
    #[error("audio unsupported: {0}")]
    Unsupported(String),
    #[error("{node} creation failed: {reason}")]
    NodeCreation { node: &'static str, reason: String },
    #[error("scheduling failed: {0}")]
    Scheduling(String),
}
