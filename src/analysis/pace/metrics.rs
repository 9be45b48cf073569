/*!
 * Sliding-window speaking rate metrics.
 *
 * A fixed-length window slides across the answer one step at a time. Each
 * window's words-per-minute is labelled against the pace bands, and runs of
 * same-label windows are merged into segments annotated with what was said.
 */

use serde::{Deserialize, Serialize};

use crate::analysis::thresholds::{PaceThresholds, PACE_WINDOW_SECS, PACE_WINDOW_STEP_SECS};
use crate::analysis::timefmt::round1;
use crate::errors::AnalysisError;
use crate::transcript::Word;

/// Pace band of a window or of a whole answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceLabel {
    TooSlow,
    Ideal,
    TooFast,
}

impl PaceLabel {
    /// All labels in reporting order
    pub const ALL: [PaceLabel; 3] = [PaceLabel::TooSlow, PaceLabel::Ideal, PaceLabel::TooFast];

    /// Label a speaking rate. Both band edges count as ideal.
    pub fn classify(wpm: f64, thresholds: &PaceThresholds) -> Self {
        if wpm < thresholds.too_slow_below_wpm {
            Self::TooSlow
        } else if wpm > thresholds.too_fast_above_wpm {
            Self::TooFast
        } else {
            Self::Ideal
        }
    }

    /// Machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooSlow => "too_slow",
            Self::Ideal => "ideal",
            Self::TooFast => "too_fast",
        }
    }

    /// Capitalised name for feedback headings
    pub fn heading(&self) -> &'static str {
        match self {
            Self::TooSlow => "Too slow",
            Self::Ideal => "Ideal",
            Self::TooFast => "Too fast",
        }
    }
}

impl std::fmt::Display for PaceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A maximal run of consecutive same-label windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceSegment {
    /// Segment start in seconds
    pub start: f64,
    /// Segment end in seconds
    pub end: f64,
    /// Pace band shared by every window in the run
    pub label: PaceLabel,
    /// Words overlapping `[start, end)`, ordered by start time
    pub text: String,
}

/// Pace metrics for one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceMetrics {
    /// Average words per minute over the whole answer
    pub avg_wpm: f64,
    /// Percent of windows below the ideal band
    pub too_slow_pct: f64,
    /// Percent of windows inside the ideal band
    pub ideal_pct: f64,
    /// Percent of windows above the ideal band
    pub too_fast_pct: f64,
    /// Labelled segments in time order
    pub segments: Vec<PaceSegment>,
    /// Number of windows evaluated
    pub window_count: usize,
}

impl PaceMetrics {
    /// Pace band of the answer's average rate
    pub fn category(&self, thresholds: &PaceThresholds) -> PaceLabel {
        PaceLabel::classify(self.avg_wpm, thresholds)
    }

    /// Segments carrying the given label
    pub fn segments_with(&self, label: PaceLabel) -> impl Iterator<Item = &PaceSegment> {
        self.segments.iter().filter(move |s| s.label == label)
    }
}

/// Compute pace metrics from word timings.
///
/// Degenerate word durations are repaired first. Returns
/// `AnalysisError::InsufficientData` when there are no words or the answer
/// spans no time.
pub fn calculate_pace_metrics(
    words: &[Word],
    thresholds: &PaceThresholds,
) -> Result<PaceMetrics, AnalysisError> {
    let words: Vec<Word> = words.iter().map(Word::repaired).collect();
    if words.is_empty() {
        return Err(AnalysisError::InsufficientData("no timed words".to_string()));
    }

    let first_start = words.iter().map(|w| w.start).fold(f64::INFINITY, f64::min);
    let last_end = words.iter().map(|w| w.end).fold(f64::NEG_INFINITY, f64::max);
    let total_time = last_end - first_start;
    if !(total_time > 0.0) {
        return Err(AnalysisError::InsufficientData(format!(
            "answer spans {:.2}s",
            total_time
        )));
    }

    let avg_wpm = words.len() as f64 / (total_time / 60.0);

    let window_secs = positive_or(thresholds.window_secs, PACE_WINDOW_SECS);
    let step_secs = positive_or(thresholds.window_step_secs, PACE_WINDOW_STEP_SECS);

    let (mut too_slow, mut ideal, mut too_fast) = (0usize, 0usize, 0usize);
    let mut segments = Vec::new();
    let mut current_label: Option<PaceLabel> = None;
    let mut segment_start = first_start;
    let mut window_count = 0usize;

    loop {
        let window_start = first_start + step_secs * window_count as f64;
        if window_start > last_end - window_secs {
            break;
        }
        let window_end = window_start + window_secs;

        let count = words
            .iter()
            .filter(|w| w.overlaps(window_start, window_end))
            .count();
        let wpm = count as f64 / window_secs * 60.0;
        let label = PaceLabel::classify(wpm, thresholds);

        match label {
            PaceLabel::TooSlow => too_slow += 1,
            PaceLabel::Ideal => ideal += 1,
            PaceLabel::TooFast => too_fast += 1,
        }

        if current_label != Some(label) {
            if let Some(previous) = current_label {
                segments.push(segment(&words, segment_start, window_start, previous));
            }
            segment_start = window_start;
            current_label = Some(label);
        }

        window_count += 1;
    }

    if let Some(label) = current_label {
        segments.push(segment(&words, segment_start, last_end, label));
    }

    let pct = |n: usize| {
        if window_count > 0 {
            round1(n as f64 / window_count as f64 * 100.0)
        } else {
            0.0
        }
    };

    Ok(PaceMetrics {
        avg_wpm: round1(avg_wpm),
        too_slow_pct: pct(too_slow),
        ideal_pct: pct(ideal),
        too_fast_pct: pct(too_fast),
        segments,
        window_count,
    })
}

/// Words overlapping `[start, end)`, sorted by start time and space-joined
pub fn text_in_interval(words: &[Word], start: f64, end: f64) -> String {
    let mut overlapping: Vec<&Word> = words.iter().filter(|w| w.overlaps(start, end)).collect();
    overlapping.sort_by(|a, b| a.start.total_cmp(&b.start));
    overlapping
        .iter()
        .map(|w| w.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn segment(words: &[Word], start: f64, end: f64, label: PaceLabel) -> PaceSegment {
    PaceSegment {
        start,
        end,
        label,
        text: text_in_interval(words, start, end),
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}
