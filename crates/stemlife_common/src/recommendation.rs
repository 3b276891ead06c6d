//! STEM field recommendation derived from accumulated interest stats.

use serde::{Deserialize, Serialize};

/// Age at which the recommendation unlocks.
pub const RECOMMENDATION_AGE: i64 = 18;

/// The four interest percentages, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    pub science: i64,
    pub technology: i64,
    pub engineering: i64,
    pub math: i64,
}

/// A recommendation label plus the breakdown it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub field: String,
    pub interests: InterestBreakdown,
}

/// Pick the field with the highest interest. Ties break in the order
/// science, technology, engineering, math. Pure and idempotent for a given
/// breakdown.
pub fn recommend(interests: InterestBreakdown) -> Recommendation {
    let ranked = [
        ("Science", interests.science),
        ("Technology", interests.technology),
        ("Engineering", interests.engineering),
        ("Mathematics", interests.math),
    ];
    let mut best = ranked[0];
    for candidate in &ranked[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    Recommendation {
        field: best.0.to_string(),
        interests,
    }
}
