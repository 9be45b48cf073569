/*!
 * Pause analysis: extraction, LLM-assisted recommendation, classification
 * and report synthesis.
 */

pub mod classify;
pub mod extract;
pub mod feedback;
pub mod prompts;
pub mod recommend;

pub use classify::{
    classify_pauses, quartiles, ClassificationThresholds, ClassifiedPauses, PauseLabel, ThresholdSource,
};
pub use extract::{extract_pauses, Pause};
pub use feedback::{build_report, heuristic_score, synthesize, CoachingAdvice, PauseStatistics, PauseSummary};
pub use recommend::{align, find_pause_indices};
