/*!
 * Speech pacing and pause analysis.
 *
 * - `pace`: sliding-window words-per-minute metrics and the pace score
 * - `pause`: inter-word gap extraction, classification and coaching
 * - `engine`: `SpeechAnalyzer`, which runs both pipelines
 * - `report`: result records
 * - `thresholds`: tunable constants
 * - `timefmt`: timestamp and percentage formatting
 */

pub mod engine;
pub mod pace;
pub mod pause;
pub mod report;
pub mod thresholds;
pub mod timefmt;

pub use engine::{cancel_pair, AnalysisSettings, CancelHandle, CancelSignal, SpeechAnalyzer};
pub use report::{AnalysisReport, PaceResult, PauseReport};
pub use thresholds::{PaceThresholds, PauseThresholds};
