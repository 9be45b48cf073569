/*!
 * Distribution-aware pause classification.
 *
 * Thresholds come from the speaker's own pause distribution when there are
 * enough pauses for stable quartiles, and from a speaking-rate scaled
 * heuristic otherwise. Each pause then receives exactly one label, checked
 * in a fixed priority order: strategic, long, rushed, normal.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::analysis::pause::extract::Pause;
use crate::analysis::thresholds::{
    PauseThresholds, LONG_Q3_FACTOR, REFERENCE_WPM, RUSHED_Q1_FACTOR, SCALED_LONG_BASE_SECS,
    SCALED_LONG_MAX_SECS, SCALED_RUSHED_BASE_SECS, SCALED_RUSHED_MAX_SECS, SCALED_RUSHED_MIN_SECS,
};
use crate::transcript::Word;

/// Category assigned to a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseLabel {
    /// Disruptively long silence
    Long,
    /// Breathless transition
    Rushed,
    /// Helpful emphasis pause
    Strategic,
    /// None of the above
    Normal,
}

impl PauseLabel {
    /// All labels in report order
    pub const ALL: [PauseLabel; 4] = [
        PauseLabel::Long,
        PauseLabel::Rushed,
        PauseLabel::Strategic,
        PauseLabel::Normal,
    ];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Rushed => "rushed",
            Self::Strategic => "strategic",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for PauseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the thresholds were derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// From Q1/Q3 of the pause durations
    Quartile,
    /// From the speaking rate
    WpmScaled,
}

/// Cut points used to label pauses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Pauses longer than this are long
    pub long: f64,
    /// Pauses shorter than this are rushed
    pub rushed: f64,
    /// Strategic band lower edge (inclusive)
    pub strategic_min: f64,
    /// Strategic band upper edge (inclusive)
    pub strategic_max: f64,
    /// Derivation branch
    pub source: ThresholdSource,
}

impl ClassificationThresholds {
    /// Pick thresholds for a pause list
    pub fn derive(pauses: &[Pause], words: &[Word], config: &PauseThresholds) -> Self {
        let thresholds = if pauses.len() >= config.quartile_min_pauses {
            let durations: Vec<f64> = pauses.iter().map(|p| p.duration).collect();
            match quartiles(&durations) {
                Some((q1, q3)) => Self::from_quartiles(q1, q3, config),
                None => {
                    debug!("Quartile computation failed, using WPM-scaled thresholds");
                    Self::wpm_scaled(words, config)
                }
            }
        } else {
            debug!(
                "Only {} pauses, using WPM-scaled thresholds",
                pauses.len()
            );
            Self::wpm_scaled(words, config)
        };

        debug!(
            "Pause thresholds ({:?}): long > {:.2}s, rushed < {:.2}s, strategic {:.2}-{:.2}s",
            thresholds.source,
            thresholds.long,
            thresholds.rushed,
            thresholds.strategic_min,
            thresholds.strategic_max
        );
        thresholds
    }

    /// Thresholds from the first and third quartile
    pub fn from_quartiles(q1: f64, q3: f64, config: &PauseThresholds) -> Self {
        Self {
            long: config.long_floor_secs.max(q3 * LONG_Q3_FACTOR),
            rushed: (q1 * RUSHED_Q1_FACTOR).clamp(config.rushed_floor_secs, config.rushed_ceiling_secs),
            strategic_min: config.strategic_min_secs,
            strategic_max: config.strategic_max_secs,
            source: ThresholdSource::Quartile,
        }
    }

    /// Thresholds scaled by how fast the speaker talks relative to 120 WPM
    pub fn wpm_scaled(words: &[Word], config: &PauseThresholds) -> Self {
        let wpm = estimate_wpm(words);
        let scale = if wpm > 0.0 { REFERENCE_WPM / wpm } else { 1.0 };

        let long = if scale > 1.0 {
            SCALED_LONG_BASE_SECS * scale
        } else {
            SCALED_LONG_BASE_SECS
        };
        let rushed = if scale < 1.0 {
            SCALED_RUSHED_BASE_SECS * scale
        } else {
            SCALED_RUSHED_BASE_SECS
        };

        Self {
            long: long.min(SCALED_LONG_MAX_SECS),
            rushed: rushed.clamp(SCALED_RUSHED_MIN_SECS, SCALED_RUSHED_MAX_SECS),
            strategic_min: config.strategic_min_secs,
            strategic_max: config.strategic_max_secs,
            source: ThresholdSource::WpmScaled,
        }
    }

    /// Label one pause.
    ///
    /// `recommended` holds indices of words a pause was advised before; a
    /// short pause ahead of such a word is not counted as rushed.
    pub fn label(&self, pause: &Pause, recommended: &HashSet<usize>) -> PauseLabel {
        let duration = pause.duration;
        if self.strategic_min <= duration && duration <= self.strategic_max {
            PauseLabel::Strategic
        } else if duration > self.long {
            PauseLabel::Long
        } else if duration < self.rushed && !recommended.contains(&(pause.index + 1)) {
            PauseLabel::Rushed
        } else {
            PauseLabel::Normal
        }
    }
}

/// Average speaking rate over the whole word list, 120 WPM when indeterminate
pub fn estimate_wpm(words: &[Word]) -> f64 {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return REFERENCE_WPM;
    };
    let total_time = last.end - first.start;
    if total_time <= 0.0 {
        REFERENCE_WPM
    } else {
        words.len() as f64 / total_time * 60.0
    }
}

/// First and third quartile using the exclusive method.
///
/// Needs at least two finite values. With very few values the cut points
/// may extrapolate beyond the data.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut data = values.to_vec();
    data.sort_by(f64::total_cmp);

    let len = data.len();
    let m = len + 1;
    let cut = |i: usize| {
        let j = (i * m / 4).clamp(1, len - 1);
        let delta = (i * m) as f64 - (j * 4) as f64;
        (data[j - 1] * (4.0 - delta) + data[j] * delta) / 4.0
    };

    Some((cut(1), cut(3)))
}

/// Pauses paired with their labels
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPauses {
    /// Thresholds the labels were assigned with
    pub thresholds: ClassificationThresholds,
    /// Every pause in extraction order with its label
    pub labelled: Vec<(Pause, PauseLabel)>,
}

impl ClassifiedPauses {
    /// Total number of pauses
    pub fn total(&self) -> usize {
        self.labelled.len()
    }

    /// Pauses carrying `label`, in extraction order
    pub fn with_label(&self, label: PauseLabel) -> impl Iterator<Item = &Pause> {
        self.labelled
            .iter()
            .filter(move |(_, l)| *l == label)
            .map(|(p, _)| p)
    }

    /// Number of pauses carrying `label`
    pub fn count(&self, label: PauseLabel) -> usize {
        self.with_label(label).count()
    }

    /// Share of pauses carrying `label`, 0 when there are none
    pub fn fraction(&self, label: PauseLabel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(label) as f64 / total as f64,
        }
    }

    /// Mean duration of pauses carrying `label`, 0 when there are none
    pub fn mean_duration(&self, label: PauseLabel) -> f64 {
        let (sum, count) = self
            .with_label(label)
            .fold((0.0, 0usize), |(sum, count), p| (sum + p.duration, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

/// Label every pause
pub fn classify_pauses(
    pauses: &[Pause],
    thresholds: ClassificationThresholds,
    recommended: &[usize],
) -> ClassifiedPauses {
    let recommended: HashSet<usize> = recommended.iter().copied().collect();
    let labelled = pauses
        .iter()
        .map(|pause| (pause.clone(), thresholds.label(pause, &recommended)))
        .collect();

    ClassifiedPauses {
        thresholds,
        labelled,
    }
}
