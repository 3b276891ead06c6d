//! Wire protocol for the game server's informal REST-over-JSON surface.
//!
//! Decoders are permissive on extra fields and strict on missing ones:
//! anything the client depends on but cannot find is a
//! [`GameError::Protocol`]. The server signals "no more events" inside a
//! 200 body, which decodes to [`FetchOutcome::Exhausted`] rather than an
//! error.

use crate::error::GameError;
use crate::event::{AnswerFeedback, LifeEvent};
use crate::player::PlayerState;
use crate::recommendation::{InterestBreakdown, Recommendation};
use serde::{Deserialize, Serialize};

/// Result of asking for the current event: either content or the explicit
/// terminal signal.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Event(EventBundle),
    Exhausted,
}

/// An event together with the authoritative player snapshot that came with
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBundle {
    pub event: LifeEvent,
    pub player: PlayerState,
}

/// Result of a successful choice submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceResult {
    pub player: PlayerState,
    /// Present once the player is old enough, per the server.
    pub recommendation: Option<String>,
    /// Correct/incorrect feedback, legacy local variant only.
    pub feedback: Option<AnswerFeedback>,
}

/// Body of `POST /make-choice/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeChoiceRequest {
    pub choice_index: usize,
}

#[derive(Debug, Deserialize)]
struct CurrentEventEnvelope {
    event: Option<LifeEvent>,
    player: Option<PlayerState>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MakeChoiceEnvelope {
    #[serde(default)]
    success: bool,
    player: Option<PlayerState>,
    #[serde(default)]
    stem_recommendation: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationEnvelope {
    recommendation: Option<String>,
    interests: Option<InterestBreakdown>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResetEnvelope {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

fn parse<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, GameError> {
    serde_json::from_str(body).map_err(|e| GameError::Protocol(format!("undecodable body: {e}")))
}

/// Decode `GET /get-current-event/`. A 200 body carrying an `error` field is
/// the server's way of saying the current stage has no events left.
pub fn decode_current_event(body: &str) -> Result<FetchOutcome, GameError> {
    let envelope: CurrentEventEnvelope = parse(body)?;
    if let Some(reason) = envelope.error {
        tracing::debug!(%reason, "server reports no current event");
        return Ok(FetchOutcome::Exhausted);
    }
    match (envelope.event, envelope.player) {
        (Some(event), Some(mut player)) => {
            player.clamp_stats();
            Ok(FetchOutcome::Event(EventBundle { event, player }))
        }
        _ => Err(GameError::Protocol(
            "response missing event or player data".to_string(),
        )),
    }
}

/// Decode `POST /make-choice/`.
pub fn decode_make_choice(body: &str) -> Result<ChoiceResult, GameError> {
    let envelope: MakeChoiceEnvelope = parse(body)?;
    if !envelope.success {
        let reason = envelope
            .error
            .unwrap_or_else(|| "choice rejected without a reason".to_string());
        return Err(GameError::Protocol(reason));
    }
    let mut player = envelope
        .player
        .ok_or_else(|| GameError::Protocol("choice response missing player".to_string()))?;
    player.clamp_stats();
    Ok(ChoiceResult {
        player,
        recommendation: envelope.stem_recommendation,
        feedback: None,
    })
}

/// Decode `GET /get-stem-recommendation/`.
pub fn decode_recommendation(body: &str) -> Result<Recommendation, GameError> {
    let envelope: RecommendationEnvelope = parse(body)?;
    if let Some(reason) = envelope.error {
        return Err(GameError::Protocol(reason));
    }
    match (envelope.recommendation, envelope.interests) {
        (Some(field), Some(interests)) => Ok(Recommendation { field, interests }),
        _ => Err(GameError::Protocol(
            "recommendation response missing fields".to_string(),
        )),
    }
}

/// Decode `GET /reset-game/`.
pub fn decode_reset(body: &str) -> Result<(), GameError> {
    let envelope: ResetEnvelope = parse(body)?;
    if envelope.success {
        Ok(())
    } else {
        Err(GameError::Protocol(
            envelope
                .error
                .unwrap_or_else(|| "reset rejected without a reason".to_string()),
        ))
    }
}
