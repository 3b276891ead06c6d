//! Backend abstraction over the game's content source.
//!
//! Production code talks to the game server through
//! [`crate::client::HttpGameClient`]; the legacy variant plays from the
//! built-in bank through [`crate::local::LocalGame`]; tests use
//! [`FakeBackend`] with pre-configured responses. The session controller
//! only ever sees this trait.

use async_trait::async_trait;
use std::collections::VecDeque;
use stemlife_common::protocol::{ChoiceResult, FetchOutcome};
use stemlife_common::recommendation::Recommendation;
use stemlife_common::GameError;

#[async_trait]
pub trait GameBackend: Send {
    /// Fetch the current event plus the authoritative player snapshot, or
    /// the explicit terminal signal.
    async fn fetch_current_event(&mut self) -> Result<FetchOutcome, GameError>;

    /// Submit a choice by index and receive the updated player state.
    async fn submit_choice(&mut self, choice_index: usize) -> Result<ChoiceResult, GameError>;

    /// Fetch the STEM recommendation for the current player.
    async fn fetch_recommendation(&mut self) -> Result<Recommendation, GameError>;

    /// Reset server-side (or local) game state to its starting values.
    async fn reset(&mut self) -> Result<(), GameError>;

    /// Plant height, reported by the legacy local variant only.
    fn plant_height(&self) -> Option<i64> {
        None
    }
}

/// Scripted backend for deterministic session tests. Fetches pop from
/// `fetches` (empty queue means exhausted); submissions pop from
/// `choice_results` and are recorded in `submitted`.
#[derive(Default)]
pub struct FakeBackend {
    pub fetches: VecDeque<Result<FetchOutcome, GameError>>,
    pub choice_results: VecDeque<Result<ChoiceResult, GameError>>,
    pub recommendation: Option<Recommendation>,
    pub submitted: Vec<usize>,
    pub reset_calls: usize,
}

#[async_trait]
impl GameBackend for FakeBackend {
    async fn fetch_current_event(&mut self) -> Result<FetchOutcome, GameError> {
        self.fetches
            .pop_front()
            .unwrap_or(Ok(FetchOutcome::Exhausted))
    }

    async fn submit_choice(&mut self, choice_index: usize) -> Result<ChoiceResult, GameError> {
        self.submitted.push(choice_index);
        self.choice_results
            .pop_front()
            .unwrap_or_else(|| Err(GameError::Protocol("unscripted submission".to_string())))
    }

    async fn fetch_recommendation(&mut self) -> Result<Recommendation, GameError> {
        self.recommendation
            .clone()
            .ok_or_else(|| GameError::Protocol("unscripted recommendation".to_string()))
    }

    async fn reset(&mut self) -> Result<(), GameError> {
        self.reset_calls += 1;
        Ok(())
    }
}
