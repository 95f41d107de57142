//! Weighted aggregation of the four slider scores.
//!
//! Personal affinity (35% love, 65% usefulness) is blended evenly with public
//! value (usage and value at 50% each). The inputs are expected in `0..=100`
//! but nothing here clamps or rejects them; range checks belong to the caller.

use serde::Serialize;

use super::domain::Scores;

const LOVE_WEIGHT: f64 = 0.35;
const USEFULNESS_WEIGHT: f64 = 0.65;
const USAGE_WEIGHT: f64 = 0.5;
const VALUE_WEIGHT: f64 = 0.5;
const HALF: f64 = 0.5;

/// Intermediate blends kept alongside the total for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub love_usefulness: f64,
    pub usage_value: f64,
    pub total: f64,
}

pub fn breakdown(scores: &Scores) -> ScoreBreakdown {
    let love_usefulness = scores.love * LOVE_WEIGHT + scores.usefulness * USEFULNESS_WEIGHT;
    let usage_value = scores.usage * USAGE_WEIGHT + scores.value * VALUE_WEIGHT;
    let total = round_cents(love_usefulness * HALF + usage_value * HALF);

    ScoreBreakdown {
        love_usefulness,
        usage_value,
        total,
    }
}

pub fn total(scores: &Scores) -> f64 {
    breakdown(scores).total
}

/// Format a total the way it is displayed and shared: always two decimals.
pub fn format_total(total: f64) -> String {
    format!("{total:.2}")
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
