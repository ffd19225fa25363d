use chrono::Utc;
use codelearn_common::types::{FeedbackEntry, PASSING_SCORE};

/// Category-tagged feedback entries and a running point total for one
/// evaluation call. Owned by that call, never shared; entries keep call
/// order. The running score is unbounded during accumulation and only the
/// final reported score is clamped to 0..=100.
#[derive(Debug, Default)]
pub struct Scorecard {
    entries: Vec<FeedbackEntry>,
    score: i32,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one feedback entry and adjust the running score.
    pub fn add_feedback(
        &mut self,
        category: &str,
        messages: Vec<String>,
        passed: bool,
        points: i32,
    ) {
        self.entries.push(FeedbackEntry {
            category: category.to_string(),
            passed,
            messages,
            timestamp: Utc::now(),
        });
        self.score += points;
    }

    /// Raw accumulated score, unclamped.
    pub fn raw_score(&self) -> i32 {
        self.score
    }

    /// Final score clamped to 0..=100.
    pub fn final_score(&self) -> u32 {
        self.score.clamp(0, 100) as u32
    }

    /// Overall verdict: passing at or above the threshold.
    pub fn passed(&self) -> bool {
        self.final_score() >= PASSING_SCORE
    }

    /// Consume the scorecard, yielding the entries in insertion order.
    pub fn into_entries(self) -> Vec<FeedbackEntry> {
        self.entries
    }
}
