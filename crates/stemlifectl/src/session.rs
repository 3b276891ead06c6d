//! Session controller: the progression state machine over a backend.
//!
//! Owns the player profile, the cursor, and the single-request guard. At
//! most one `advance`/`submit_choice` may be in flight per session; a
//! second call while one is pending is rejected with
//! [`GameError::RequestPending`] rather than interleaved. A request whose
//! future is cancelled mid-flight (timeout, user interrupt) can never apply
//! state, but it does leave the pending flag set; `reset` clears it, so the
//! session is always recoverable to an interactive state.

use crate::backend::GameBackend;
use std::time::Duration;
use stemlife_common::cursor::{Phase, ProgressionCursor};
use stemlife_common::event::{AnswerFeedback, LifeEvent};
use stemlife_common::protocol::FetchOutcome;
use stemlife_common::recommendation::{Recommendation, RECOMMENDATION_AGE};
use stemlife_common::{GameError, PlayerState};
use tracing::debug;

/// What `advance` produced: content to render, or the terminal condition.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Presented(LifeEvent),
    NoMoreContent,
}

/// Result of a successful submission, including when to schedule the next
/// advance. The continuation is the caller's to run; the controller never
/// blocks on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    pub player: PlayerState,
    pub recommendation: Option<String>,
    pub feedback: Option<AnswerFeedback>,
    pub advance_after: Duration,
}

pub struct Session<B: GameBackend> {
    backend: B,
    initial_player: PlayerState,
    player: PlayerState,
    cursor: ProgressionCursor,
    current_event: Option<LifeEvent>,
    pending: bool,
    advance_delay: Duration,
}

impl<B: GameBackend> Session<B> {
    pub fn new(backend: B, initial_player: PlayerState, advance_delay: Duration) -> Self {
        Self {
            backend,
            player: initial_player.clone(),
            initial_player,
            cursor: ProgressionCursor::new(),
            current_event: None,
            pending: false,
            advance_delay,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn phase(&self) -> Phase {
        self.cursor.phase()
    }

    pub fn cursor(&self) -> &ProgressionCursor {
        &self.cursor
    }

    pub fn current_event(&self) -> Option<&LifeEvent> {
        self.current_event.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Request the next event. Valid in `Idle`; `Completed` sessions report
    /// [`GameError::SessionExhausted`] instead. On the terminal signal the
    /// session transitions to `Completed`; on an event it transitions to
    /// `Presenting` and hands the event back for rendering. On failure the
    /// phase is unchanged (`Idle`) so the user can retry.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, GameError> {
        if self.cursor.phase() == Phase::Completed {
            return Err(GameError::SessionExhausted);
        }
        self.cursor.expect(Phase::Idle)?;
        if self.pending {
            return Err(GameError::RequestPending);
        }

        self.pending = true;
        let fetched = self.backend.fetch_current_event().await;
        self.pending = false;

        match fetched? {
            FetchOutcome::Event(bundle) => {
                debug!(event_id = bundle.event.id, "presenting event");
                self.player = bundle.player;
                self.current_event = Some(bundle.event.clone());
                self.cursor.present()?;
                Ok(AdvanceOutcome::Presented(bundle.event))
            }
            FetchOutcome::Exhausted => {
                debug!("no more content, session completed");
                self.cursor.complete()?;
                Ok(AdvanceOutcome::NoMoreContent)
            }
        }
    }

    /// Mark the presented event as open for input:
    /// `Presenting -> AwaitingAnswer`.
    pub fn begin_selection(&mut self) -> Result<(), GameError> {
        self.cursor.open_selection()
    }

    /// Submit the selected choice. Valid only in `AwaitingAnswer`, and the
    /// index must address an option of the current event; otherwise the
    /// player profile is left untouched. On success the backend's player
    /// snapshot is applied, the cursor advances, and the caller receives
    /// the delay after which to schedule the next `advance`. On backend
    /// failure the phase stays `AwaitingAnswer` so the selection can be
    /// retried.
    pub async fn submit_choice(&mut self, index: usize) -> Result<ChoiceOutcome, GameError> {
        self.cursor.expect(Phase::AwaitingAnswer)?;
        let available = self
            .current_event
            .as_ref()
            .map(|e| e.choices.len())
            .unwrap_or(0);
        if index >= available {
            return Err(GameError::InvalidChoice { index, available });
        }
        if self.pending {
            return Err(GameError::RequestPending);
        }

        self.pending = true;
        let submitted = self.backend.submit_choice(index).await;
        self.pending = false;

        let result = submitted?;
        debug!(age = result.player.age, "choice applied");
        self.player = result.player;
        self.current_event = None;
        self.cursor.complete_submission()?;

        Ok(ChoiceOutcome {
            player: self.player.clone(),
            recommendation: result.recommendation,
            feedback: result.feedback,
            advance_after: self.advance_delay,
        })
    }

    /// STEM recommendation for the current player. Locked until the player
    /// reaches [`RECOMMENDATION_AGE`]; side-effect free and stable across
    /// repeated calls for the same profile.
    pub async fn recommendation(&mut self) -> Result<Recommendation, GameError> {
        if self.player.age < RECOMMENDATION_AGE {
            return Err(GameError::RecommendationLocked {
                age: self.player.age,
                threshold: RECOMMENDATION_AGE,
            });
        }
        self.backend.fetch_recommendation().await
    }

    /// Reinitialize the session to its start-of-session defaults and ask
    /// the backend to do the same. Local state is reset before the backend
    /// call, and the pending flag is cleared unconditionally, so even a
    /// dead or unreachable backend leaves the session interactive.
    pub async fn reset(&mut self) -> Result<(), GameError> {
        self.pending = false;
        self.current_event = None;
        self.cursor.reset();
        self.player = self.initial_player.clone();
        self.backend.reset().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FakeBackend, GameBackend};
    use crate::local::LocalGame;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use stemlife_common::event::Choice;
    use stemlife_common::protocol::{ChoiceResult, EventBundle};
    use stemlife_common::recommendation::InterestBreakdown;

    fn event(id: i64, options: usize) -> LifeEvent {
        LifeEvent {
            id,
            title: format!("event {id}"),
            description: "something happens".to_string(),
            category: None,
            choices: (0..options)
                .map(|i| Choice {
                    text: format!("option {i}"),
                    effects: Default::default(),
                })
                .collect(),
        }
    }

    fn player_at(age: i64) -> PlayerState {
        PlayerState {
            age,
            ..PlayerState::default()
        }
    }

    fn bundle(id: i64, age: i64) -> Result<FetchOutcome, GameError> {
        Ok(FetchOutcome::Event(EventBundle {
            event: event(id, 2),
            player: player_at(age),
        }))
    }

    fn applied(age: i64) -> Result<ChoiceResult, GameError> {
        Ok(ChoiceResult {
            player: player_at(age),
            recommendation: None,
            feedback: None,
        })
    }

    fn scripted(n: usize, start_age: i64) -> FakeBackend {
        FakeBackend {
            fetches: (0..n)
                .map(|i| bundle(i as i64 + 1, start_age + i as i64))
                .collect(),
            choice_results: (0..n).map(|i| applied(start_age + i as i64 + 1)).collect(),
            ..FakeBackend::default()
        }
    }

    fn session(backend: FakeBackend) -> Session<FakeBackend> {
        Session::new(backend, PlayerState::default(), Duration::from_millis(0))
    }

    #[tokio::test]
    async fn cursor_index_equals_successful_submissions() {
        let mut s = session(scripted(3, 10));
        for _ in 0..3 {
            match s.advance().await.unwrap() {
                AdvanceOutcome::Presented(_) => {}
                AdvanceOutcome::NoMoreContent => panic!("content expected"),
            }
            s.begin_selection().unwrap();
            s.submit_choice(0).await.unwrap();
        }
        assert_eq!(s.cursor().index(), 3);

        // Content length reached: the next advance is terminal.
        assert_eq!(s.advance().await.unwrap(), AdvanceOutcome::NoMoreContent);
        assert_eq!(s.phase(), Phase::Completed);
        assert!(matches!(
            s.advance().await.unwrap_err(),
            GameError::SessionExhausted
        ));
    }

    #[tokio::test]
    async fn server_age_delta_is_applied_verbatim() {
        let mut s = session(scripted(1, 10));
        s.advance().await.unwrap();
        assert_eq!(s.player().age, 10);
        s.begin_selection().unwrap();
        let outcome = s.submit_choice(1).await.unwrap();
        assert_eq!(outcome.player.age, 11);
        assert_eq!(s.player().age, 11);
    }

    #[tokio::test]
    async fn invalid_choice_leaves_player_and_phase_untouched() {
        let mut s = session(scripted(1, 10));
        s.advance().await.unwrap();
        s.begin_selection().unwrap();
        let before = s.player().clone();

        let err = s.submit_choice(5).await.unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidChoice {
                index: 5,
                available: 2,
            }
        ));
        assert_eq!(s.player(), &before);
        assert_eq!(s.phase(), Phase::AwaitingAnswer);
        // Nothing went over the wire.
        assert!(s.backend().submitted.is_empty());

        // A corrected selection still goes through.
        s.submit_choice(0).await.unwrap();
        assert_eq!(s.cursor().index(), 1);
    }

    #[tokio::test]
    async fn submission_requires_awaiting_answer_phase() {
        let mut s = session(scripted(1, 10));
        let err = s.submit_choice(0).await.unwrap_err();
        assert!(matches!(err, GameError::PhaseViolation { .. }));

        s.advance().await.unwrap();
        // Still presenting: selection not yet open.
        let err = s.submit_choice(0).await.unwrap_err();
        assert!(matches!(
            err,
            GameError::PhaseViolation {
                expected: Phase::AwaitingAnswer,
                actual: Phase::Presenting,
            }
        ));
    }

    #[tokio::test]
    async fn terminal_signal_completes_without_an_event() {
        let mut s = session(FakeBackend::default());
        assert_eq!(s.advance().await.unwrap(), AdvanceOutcome::NoMoreContent);
        assert_eq!(s.phase(), Phase::Completed);
        assert!(s.current_event().is_none());
    }

    #[tokio::test]
    async fn backend_failure_returns_phase_to_idle() {
        let mut s = session(FakeBackend {
            fetches: VecDeque::from([Err(GameError::Network("connection refused".into()))]),
            ..FakeBackend::default()
        });
        assert!(s.advance().await.is_err());
        assert_eq!(s.phase(), Phase::Idle);
        // Queue is drained, so the manual retry reports exhaustion cleanly.
        assert_eq!(s.advance().await.unwrap(), AdvanceOutcome::NoMoreContent);
    }

    #[tokio::test]
    async fn reset_restores_defaults_regardless_of_history() {
        let mut s = session(scripted(2, 10));
        s.advance().await.unwrap();
        s.begin_selection().unwrap();
        s.submit_choice(0).await.unwrap();
        assert_ne!(s.player(), &PlayerState::default());

        s.reset().await.unwrap();
        assert_eq!(s.player(), &PlayerState::default());
        assert_eq!(s.cursor().index(), 0);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.backend().reset_calls, 1);
    }

    #[tokio::test]
    async fn recommendation_is_locked_below_threshold() {
        let mut s = session(FakeBackend {
            recommendation: Some(Recommendation {
                field: "Science".to_string(),
                interests: InterestBreakdown::default(),
            }),
            fetches: VecDeque::from([bundle(1, 18)]),
            ..FakeBackend::default()
        });

        let err = s.recommendation().await.unwrap_err();
        assert!(matches!(
            err,
            GameError::RecommendationLocked {
                age: 0,
                threshold: 18,
            }
        ));

        // The event snapshot raises the age to the threshold.
        s.advance().await.unwrap();
        let first = s.recommendation().await.unwrap();
        let second = s.recommendation().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.field, "Science");
    }

    /// A backend whose first fetch hangs forever; later calls serve one
    /// event. Models the hung-network case the pending guard exists for.
    struct HangingBackend {
        calls: usize,
        inner: FakeBackend,
    }

    #[async_trait]
    impl GameBackend for HangingBackend {
        async fn fetch_current_event(&mut self) -> Result<FetchOutcome, GameError> {
            self.calls += 1;
            if self.calls == 1 {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.inner.fetch_current_event().await
        }

        async fn submit_choice(&mut self, choice_index: usize) -> Result<ChoiceResult, GameError> {
            self.inner.submit_choice(choice_index).await
        }

        async fn fetch_recommendation(&mut self) -> Result<Recommendation, GameError> {
            self.inner.fetch_recommendation().await
        }

        async fn reset(&mut self) -> Result<(), GameError> {
            self.inner.reset().await
        }
    }

    #[tokio::test]
    async fn cancelled_request_wedges_until_reset_clears_it() {
        let backend = HangingBackend {
            calls: 0,
            inner: FakeBackend {
                fetches: VecDeque::from([bundle(1, 10)]),
                ..FakeBackend::default()
            },
        };
        let mut s = Session::new(backend, PlayerState::default(), Duration::from_millis(0));

        // The driver gives up on the hung request and drops the future.
        let hung = tokio::time::timeout(Duration::from_millis(20), s.advance()).await;
        assert!(hung.is_err());

        // The pending flag is still set: overlapping work is refused.
        assert!(matches!(
            s.advance().await.unwrap_err(),
            GameError::RequestPending
        ));

        // Reset discards the in-flight request and recovers the session.
        s.reset().await.unwrap();
        match s.advance().await.unwrap() {
            AdvanceOutcome::Presented(event) => assert_eq!(event.id, 1),
            AdvanceOutcome::NoMoreContent => panic!("scripted event expected"),
        }
    }

    #[tokio::test]
    async fn full_local_playthrough_reaches_the_threshold() {
        let backend = LocalGame::with_rng(StdRng::seed_from_u64(42));
        let mut s = Session::new(
            backend,
            PlayerState::legacy_start(),
            Duration::from_millis(0),
        );

        let mut answered = 0;
        loop {
            match s.advance().await.unwrap() {
                AdvanceOutcome::Presented(event) => {
                    s.begin_selection().unwrap();
                    let outcome = s.submit_choice(event.choices.len() - 1).await.unwrap();
                    assert!(outcome.feedback.is_some());
                    answered += 1;
                }
                AdvanceOutcome::NoMoreContent => break,
            }
        }

        assert_eq!(answered, 8);
        assert_eq!(s.cursor().index(), 8);
        assert_eq!(s.phase(), Phase::Completed);
        assert_eq!(s.player().age, 18);
        assert!(s.recommendation().await.is_ok());
        assert!(s.backend().plant_height().unwrap() >= 8);
    }
}
