//! Error definitions for the direction pad

use thiserror::Error;

/// Errors surfaced by the pad handle and the input parsers.
///
/// The state machine itself cannot fail; these only cover the plumbing
/// around it.
#[derive(Debug, Error)]
pub enum PadError {
    /// The controller task is gone or its command queue is unusable
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// The pad was torn down and accepts no further input
    #[error("Pad has been torn down")]
    TornDown,

    /// Startup failure, e.g. spawning outside a tokio runtime
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// Malformed zone or input event description
    #[error("Parse error: {0}")]
    ParseError(String),
}
