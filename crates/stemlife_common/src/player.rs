//! Player profile: age, score, core stats and STEM interests.
//!
//! The server is authoritative for every field except `score`, which only
//! the legacy local variant uses. All stats clamp to [0, 100] after any
//! mutation, matching the server's own bounds enforcement.

use crate::recommendation::InterestBreakdown;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STAT_MIN: i64 = 0;
pub const STAT_MAX: i64 = 100;

/// Mutable per-session numeric profile of the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub age: i64,
    /// Quiz score, legacy variant only. The server never reports it.
    #[serde(default)]
    pub score: i64,
    pub health: i64,
    pub intelligence: i64,
    pub creativity: i64,
    pub logic: i64,
    pub social_skills: i64,
    pub science_interest: i64,
    pub technology_interest: i64,
    pub engineering_interest: i64,
    pub math_interest: i64,
}

impl Default for PlayerState {
    /// Start-of-session defaults, identical to the server's reset handler.
    fn default() -> Self {
        Self {
            age: 0,
            score: 0,
            health: 100,
            intelligence: 50,
            creativity: 50,
            logic: 50,
            social_skills: 50,
            science_interest: 0,
            technology_interest: 0,
            engineering_interest: 0,
            math_interest: 0,
        }
    }
}

impl PlayerState {
    /// Starting profile for the legacy local quiz, which begins at age 10.
    pub fn legacy_start() -> Self {
        Self {
            age: 10,
            ..Self::default()
        }
    }

    /// Apply a choice's stat deltas, then clamp everything back into bounds.
    pub fn apply_effects(&mut self, effects: &StatEffects) {
        self.science_interest += effects.science;
        self.technology_interest += effects.technology;
        self.engineering_interest += effects.engineering;
        self.math_interest += effects.math;
        self.health += effects.health;
        self.intelligence += effects.intelligence;
        self.creativity += effects.creativity;
        self.logic += effects.logic;
        self.social_skills += effects.social;
        self.clamp_stats();
    }

    /// Clamp all nine stat fields into [STAT_MIN, STAT_MAX]. Age and score
    /// are unbounded.
    pub fn clamp_stats(&mut self) {
        for stat in [
            &mut self.health,
            &mut self.intelligence,
            &mut self.creativity,
            &mut self.logic,
            &mut self.social_skills,
            &mut self.science_interest,
            &mut self.technology_interest,
            &mut self.engineering_interest,
            &mut self.math_interest,
        ] {
            *stat = (*stat).clamp(STAT_MIN, STAT_MAX);
        }
    }

    pub fn stage(&self) -> LifeStage {
        LifeStage::for_age(self.age)
    }

    pub fn interests(&self) -> InterestBreakdown {
        InterestBreakdown {
            science: self.science_interest,
            technology: self.technology_interest,
            engineering: self.engineering_interest,
            math: self.math_interest,
        }
    }
}

/// Per-stat deltas attached to a choice. Any subset may be present in the
/// wire form; absent fields mean zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEffects {
    #[serde(default)]
    pub science: i64,
    #[serde(default)]
    pub technology: i64,
    #[serde(default)]
    pub engineering: i64,
    #[serde(default)]
    pub math: i64,
    #[serde(default)]
    pub health: i64,
    #[serde(default)]
    pub intelligence: i64,
    #[serde(default)]
    pub creativity: i64,
    #[serde(default)]
    pub logic: i64,
    #[serde(default)]
    pub social: i64,
}

/// Life stage derived from age. The server selects events by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Infant,
    Toddler,
    Child,
    Teen,
    YoungAdult,
    Adult,
}

impl LifeStage {
    pub fn for_age(age: i64) -> Self {
        if age < 3 {
            LifeStage::Infant
        } else if age < 6 {
            LifeStage::Toddler
        } else if age < 13 {
            LifeStage::Child
        } else if age < 20 {
            LifeStage::Teen
        } else if age < 30 {
            LifeStage::YoungAdult
        } else {
            LifeStage::Adult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifeStage::Infant => "infant",
            LifeStage::Toddler => "toddler",
            LifeStage::Child => "child",
            LifeStage::Teen => "teen",
            LifeStage::YoungAdult => "young adult",
            LifeStage::Adult => "adult",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
