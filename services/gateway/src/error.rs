use thiserror::Error;

/// Errors surfaced by the gateway protection utilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}
