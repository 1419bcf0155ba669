//! Typed errors for chain interaction.

use thiserror::Error;

/// Failures surfaced while talking to the node.
///
/// The variants are deliberately coarse: callers only need to tell transport
/// failures apart from calls the node actively rejected, and both of those
/// from parameters that were bad before any network traffic happened.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The node could not be reached or the connection dropped mid-call.
    #[error("node unreachable: {0}")]
    Connectivity(String),

    /// The node processed the request and rejected it.
    #[error("rejected by node: {0}")]
    Rejected(String),

    /// The request was malformed before any network round-trip.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl ChainError {
    /// Whether a retry after a nonce resync is worth attempting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity(_) | Self::Rejected(_))
    }
}

impl From<subxt::Error> for ChainError {
    fn from(err: subxt::Error) -> Self {
        match err {
            subxt::Error::Rpc(e) => Self::Connectivity(e.to_string()),
            other => Self::Rejected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(ChainError::Connectivity("refused".into()).is_retryable());
        assert!(ChainError::Rejected("stale nonce".into()).is_retryable());
        assert!(!ChainError::InvalidParams("missing flag".into()).is_retryable());
    }

    #[test]
    fn display_carries_the_reason() {
        let err = ChainError::Rejected("priority too low".into());
        assert_eq!(err.to_string(), "rejected by node: priority too low");
    }
}
