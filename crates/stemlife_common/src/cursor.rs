//! Progression cursor: position in the content sequence plus session phase.
//!
//! Transitions are strictly sequential; anything else is a
//! [`GameError::PhaseViolation`]. The index never decreases except through
//! an explicit reset.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Presenting,
    AwaitingAnswer,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Presenting => "presenting",
            Phase::AwaitingAnswer => "awaiting_answer",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionCursor {
    index: usize,
    phase: Phase,
}

impl Default for ProgressionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionCursor {
    pub fn new() -> Self {
        Self {
            index: 0,
            phase: Phase::Idle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn expect(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::PhaseViolation {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Idle -> Presenting, on receipt of an event.
    pub fn present(&mut self) -> Result<(), GameError> {
        self.expect(Phase::Idle)?;
        self.phase = Phase::Presenting;
        Ok(())
    }

    /// Presenting -> AwaitingAnswer, once the renderer has the event up and
    /// input is open.
    pub fn open_selection(&mut self) -> Result<(), GameError> {
        self.expect(Phase::Presenting)?;
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// AwaitingAnswer -> Idle with the index bumped, on a successful
    /// submission.
    pub fn complete_submission(&mut self) -> Result<(), GameError> {
        self.expect(Phase::AwaitingAnswer)?;
        self.index += 1;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Idle -> Completed, on the terminal no-more-content signal.
    pub fn complete(&mut self) -> Result<(), GameError> {
        self.expect(Phase::Idle)?;
        self.phase = Phase::Completed;
        Ok(())
    }

    /// Back to start-of-session, from any phase.
    pub fn reset(&mut self) {
        self.index = 0;
        self.phase = Phase::Idle;
    }
}
