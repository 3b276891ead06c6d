//! Content units: server life events and legacy quiz questions.

use crate::player::StatEffects;
use serde::{Deserialize, Serialize};

/// A life event as served by the game server. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub effects: StatEffects,
}

/// A static quiz question from the legacy local bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    /// Up to four answer options, in display order.
    pub options: Vec<String>,
    /// Index of the correct option, when the question has one.
    pub correct: Option<usize>,
    pub explanation: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Question {
    /// Render the question as a choice event so both content sources feed
    /// the same progression machinery.
    pub fn to_event(&self) -> LifeEvent {
        LifeEvent {
            id: self.id,
            title: self
                .category
                .clone()
                .unwrap_or_else(|| "Quiz".to_string()),
            description: self.text.clone(),
            category: self.category.clone(),
            choices: self
                .options
                .iter()
                .map(|text| Choice {
                    text: text.clone(),
                    effects: StatEffects::default(),
                })
                .collect(),
        }
    }
}

/// Outcome feedback for an answered quiz question (legacy variant only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub explanation: String,
}
