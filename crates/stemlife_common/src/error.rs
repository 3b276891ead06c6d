//! Error taxonomy for the game client.
//!
//! Everything a backend call or a session transition can fail with. "No more
//! content" is not in here: exhaustion is an ordinary value
//! ([`crate::protocol::FetchOutcome::Exhausted`]), not an error.

use crate::cursor::Phase;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GameError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered, but not with what the protocol promises:
    /// non-2xx status, undecodable body, or missing expected fields.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Choice index does not address an option of the current event.
    #[error("invalid choice {index}: event has {available} option(s)")]
    InvalidChoice { index: usize, available: usize },

    /// Operation invoked in a phase the state machine does not allow.
    #[error("operation requires phase {expected}, session is {actual}")]
    PhaseViolation { expected: Phase, actual: Phase },

    /// A backend request is already in flight for this session.
    #[error("a request is already in flight")]
    RequestPending,

    /// Recommendation asked for before the player is old enough.
    #[error("recommendation locked until age {threshold}, player is {age}")]
    RecommendationLocked { age: i64, threshold: i64 },

    /// Advance attempted after the session reached its terminal phase.
    #[error("session is completed, no more content")]
    SessionExhausted,
}

impl GameError {
    /// Whether the user should be told to simply retry (transient kinds).
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Network(_) | GameError::Protocol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_index() {
        let err = GameError::InvalidChoice {
            index: 7,
            available: 3,
        };
        assert_eq!(err.to_string(), "invalid choice 7: event has 3 option(s)");
    }

    #[test]
    fn network_and_protocol_are_retryable() {
        assert!(GameError::Network("refused".into()).is_retryable());
        assert!(GameError::Protocol("HTTP 500".into()).is_retryable());
        assert!(!GameError::RequestPending.is_retryable());
    }
}
