//! Error taxonomy for the agent.
//!
//! Transport failures are the only retryable class. Contract and backend
//! failures surface immediately. Tool-domain failures (file not found,
//! non-zero exit, timeout) are never errors here - they flow back to the
//! model as ordinary output strings.

use thiserror::Error;

/// Failures from the model gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Backend unreachable or the request timed out; retried with backoff
    #[error("transport error talking to model backend: {0}")]
    Transport(String),

    /// Caller violated the gateway contract (e.g. schema and tools both
    /// supplied); never retried
    #[error("gateway contract violation: {0}")]
    Contract(String),

    /// Backend answered but the exchange failed (HTTP error status,
    /// undecodable body); never retried
    #[error("model backend error: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Only transport failures warrant another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

/// Failures from tool dispatch. Only lookup and argument validation can
/// fail; tool bodies report their problems as output text.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for tool {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}
