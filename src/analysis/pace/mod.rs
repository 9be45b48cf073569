/*!
 * Speaking pace analysis: sliding-window metrics and scoring.
 */

pub mod metrics;
pub mod scorer;

pub use metrics::{calculate_pace_metrics, PaceLabel, PaceMetrics, PaceSegment};
pub use scorer::{evaluate_pace, pace_feedback, score_pace, PaceScore};
