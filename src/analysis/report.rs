/*!
 * Result records returned by the analysis engine.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::pace::scorer::{INSUFFICIENT_DATA_FEEDBACK, INSUFFICIENT_DATA_SCORE};
use crate::analysis::pause::classify::PauseLabel;
use crate::analysis::thresholds::PACE_POINTS_PER_SCORE_UNIT;

/// Pace pipeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceResult {
    /// Narrative feedback
    pub feedback: String,
    /// Score on 0-5, or -1 when there was not enough data
    pub score: f64,
    /// Average words per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpm: Option<f64>,
}

impl PaceResult {
    /// Sentinel result for empty or unusable input
    pub fn insufficient_data() -> Self {
        Self {
            feedback: INSUFFICIENT_DATA_FEEDBACK.to_string(),
            score: INSUFFICIENT_DATA_SCORE,
            wpm: None,
        }
    }

    /// Whether this is the insufficient-data sentinel
    pub fn is_insufficient(&self) -> bool {
        self.score == INSUFFICIENT_DATA_SCORE
    }

    /// Score on 0-100, `None` for the sentinel
    pub fn score_percent(&self) -> Option<f64> {
        (!self.is_insufficient()).then(|| self.score * PACE_POINTS_PER_SCORE_UNIT)
    }
}

/// Pause pipeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseReport {
    /// One-line summary of the pause categories found
    pub overview: String,
    /// Up to two timestamped examples per category
    pub details: Vec<String>,
    /// Share of all pauses per label, e.g. `"22.2%"`
    pub distribution: BTreeMap<PauseLabel, String>,
    /// Coaching paragraph
    pub actionable_feedback: String,
    /// Integer score 1-5
    pub score: u8,
}

/// Both pipelines' results for one transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Pace result
    pub pace: PaceResult,
    /// Pause result
    pub pause: PauseReport,
}
