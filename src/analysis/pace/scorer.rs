/*!
 * Pace scoring and narrative feedback.
 *
 * Two dimensions make up the canonical 0-100 score:
 * - Consistency: share of windows at ideal pace (up to 60 points)
 * - Accuracy: closeness of the average rate to the target band (up to 40 points)
 *
 * The reported score is the 0-100 value divided by 20, on a 0-5 scale.
 */

use std::fmt::Write;

use crate::analysis::pace::metrics::{calculate_pace_metrics, PaceLabel, PaceMetrics};
use crate::analysis::report::PaceResult;
use crate::analysis::thresholds::{
    PaceThresholds, ACCURACY_MAX_POINTS, ACCURACY_PENALTY_PER_WPM, CONSISTENCY_POINTS_PER_PCT,
    PACE_MAX_POINTS, PACE_POINTS_PER_SCORE_UNIT,
};
use crate::analysis::timefmt::{format_timestamp, round1};
use crate::transcript::Word;

/// Feedback returned when there is nothing to analyse
pub const INSUFFICIENT_DATA_FEEDBACK: &str = "len(words) less than 1";

/// Out-of-band score marking insufficient data
pub const INSUFFICIENT_DATA_SCORE: f64 = -1.0;

/// Pace score broken down by dimension, in canonical points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceScore {
    /// Points from time spent at ideal pace (0-60)
    pub consistency: f64,
    /// Points from the average rate (0-40)
    pub accuracy: f64,
}

impl PaceScore {
    /// Total on the canonical 0-100 scale
    pub fn points(&self) -> f64 {
        (self.consistency + self.accuracy).clamp(0.0, PACE_MAX_POINTS)
    }

    /// Total on the reported 0-5 scale, one decimal
    pub fn five_point(&self) -> f64 {
        round1(self.points() / PACE_POINTS_PER_SCORE_UNIT)
    }
}

/// Score pace metrics
pub fn score_pace(metrics: &PaceMetrics, thresholds: &PaceThresholds) -> PaceScore {
    let consistency = metrics.ideal_pct * CONSISTENCY_POINTS_PER_PCT;

    let avg = metrics.avg_wpm;
    let deviation = if avg < thresholds.target_min_wpm {
        thresholds.target_min_wpm - avg
    } else if avg > thresholds.target_max_wpm {
        avg - thresholds.target_max_wpm
    } else {
        0.0
    };
    let accuracy = (ACCURACY_MAX_POINTS - ACCURACY_PENALTY_PER_WPM * deviation).max(0.0);

    PaceScore {
        consistency,
        accuracy,
    }
}

/// Render the pace feedback text
pub fn pace_feedback(metrics: &PaceMetrics, thresholds: &PaceThresholds) -> String {
    let mut feedback = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(feedback, "Quantitative Feedback:");
    let _ = writeln!(
        feedback,
        "Words Per Minute (WPM): Your average pace: {:.1} WPM",
        metrics.avg_wpm
    );
    let _ = writeln!(
        feedback,
        "Benchmarking: Aim for {}-{} WPM in interviews",
        thresholds.target_min_wpm, thresholds.target_max_wpm
    );
    feedback.push('\n');

    let _ = writeln!(feedback, "Pace Range Classification:");
    let _ = writeln!(
        feedback,
        "- Too Slow: Your pace was slow {:.1}% of the time",
        metrics.too_slow_pct
    );
    let _ = writeln!(
        feedback,
        "- Ideal: You spoke at ideal pace for {:.1}% of the time",
        metrics.ideal_pct
    );
    let _ = writeln!(
        feedback,
        "- Too Fast: Your pace exceeded {} WPM for {:.1}% of the time",
        thresholds.too_fast_above_wpm, metrics.too_fast_pct
    );
    feedback.push('\n');

    let _ = writeln!(feedback, "Detailed Pace Segments:");
    for label in PaceLabel::ALL {
        let mut segments = metrics.segments_with(label).peekable();
        if segments.peek().is_none() {
            continue;
        }
        let _ = writeln!(feedback, "\n{} segments:", label.heading());
        for segment in segments {
            let _ = writeln!(
                feedback,
                "- [{} - {}]: {}",
                format_timestamp(segment.start),
                format_timestamp(segment.end),
                segment.text
            );
        }
    }

    feedback
}

/// Full pace evaluation of a word list.
///
/// Never fails: empty or unusable input yields the `-1` sentinel result.
pub fn evaluate_pace(words: &[Word], thresholds: &PaceThresholds) -> PaceResult {
    if words.is_empty() {
        return PaceResult::insufficient_data();
    }

    match calculate_pace_metrics(words, thresholds) {
        Ok(metrics) => {
            let score = score_pace(&metrics, thresholds);
            PaceResult {
                feedback: pace_feedback(&metrics, thresholds),
                score: score.five_point(),
                wpm: Some(metrics.avg_wpm),
            }
        }
        Err(e) => {
            log::debug!("Pace analysis skipped: {}", e);
            PaceResult::insufficient_data()
        }
    }
}
