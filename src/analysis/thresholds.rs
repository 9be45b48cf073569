/*!
 * Tuning constants for pace and pause analysis.
 *
 * Every cut-off used by the algorithms lives here so that calibration does
 * not require touching algorithm code. The structs are serde-configurable
 * and default to the constants below.
 */

use serde::{Deserialize, Serialize};

/// Length of one pace analysis window in seconds
pub const PACE_WINDOW_SECS: f64 = 5.0;

/// Distance between consecutive window starts in seconds
pub const PACE_WINDOW_STEP_SECS: f64 = 1.0;

/// Windows below this rate are labelled `too_slow`
pub const TOO_SLOW_BELOW_WPM: f64 = 105.0;

/// Windows above this rate are labelled `too_fast`
pub const TOO_FAST_ABOVE_WPM: f64 = 170.0;

/// Lower edge of the recommended interview speaking rate
pub const TARGET_MIN_WPM: f64 = 120.0;

/// Upper edge of the recommended interview speaking rate
pub const TARGET_MAX_WPM: f64 = 150.0;

/// Points earned per percent of time spent at ideal pace (max 60)
pub const CONSISTENCY_POINTS_PER_PCT: f64 = 0.6;

/// Points for an average rate inside the target band
pub const ACCURACY_MAX_POINTS: f64 = 40.0;

/// Points lost per WPM the average sits outside the target band
pub const ACCURACY_PENALTY_PER_WPM: f64 = 2.0;

/// Canonical pace score ceiling
pub const PACE_MAX_POINTS: f64 = 100.0;

/// Divisor mapping 0-100 points onto the reported 0-5 scale
pub const PACE_POINTS_PER_SCORE_UNIT: f64 = 20.0;

/// Minimum number of pauses before quartiles are trusted
pub const QUARTILE_MIN_PAUSES: usize = 8;

/// Rushed threshold as a fraction of Q1
pub const RUSHED_Q1_FACTOR: f64 = 0.5;

/// Rushed threshold floor; shorter gaps are timestamp noise
pub const RUSHED_FLOOR_SECS: f64 = 0.02;

/// Rushed threshold ceiling; roughly the shortest perceptible silence
pub const RUSHED_CEILING_SECS: f64 = 0.12;

/// Long threshold as a multiple of Q3
pub const LONG_Q3_FACTOR: f64 = 3.0;

/// Long threshold floor
pub const LONG_FLOOR_SECS: f64 = 2.0;

/// Shortest silence counted as a strategic pause
pub const STRATEGIC_MIN_SECS: f64 = 0.15;

/// Longest silence counted as a strategic pause
pub const STRATEGIC_MAX_SECS: f64 = 2.5;

/// Speaking rate the WPM-scaled thresholds are calibrated for
pub const REFERENCE_WPM: f64 = 120.0;

/// Long threshold at the reference rate
pub const SCALED_LONG_BASE_SECS: f64 = 1.0;

/// Long threshold cap for slow speakers
pub const SCALED_LONG_MAX_SECS: f64 = 3.0;

/// Rushed threshold at the reference rate
pub const SCALED_RUSHED_BASE_SECS: f64 = 0.1;

/// Rushed threshold floor for fast speakers
pub const SCALED_RUSHED_MIN_SECS: f64 = 0.05;

/// Rushed threshold ceiling
pub const SCALED_RUSHED_MAX_SECS: f64 = 0.2;

/// Example lines reported per pause category
pub const MAX_DETAILS_PER_CATEGORY: usize = 2;

// Pause score rubric (percentages of all pauses, durations in seconds).

/// Tier 5: minimum strategic share
pub const TIER5_MIN_STRATEGIC_PCT: f64 = 20.0;
/// Tier 5: maximum rushed share
pub const TIER5_MAX_RUSHED_PCT: f64 = 10.0;
/// Tier 5: maximum long share
pub const TIER5_MAX_LONG_PCT: f64 = 10.0;
/// Tier 5: minimum mean strategic pause length
pub const TIER5_MIN_MEAN_STRATEGIC_SECS: f64 = 0.25;

/// Tier 4: minimum strategic share
pub const TIER4_MIN_STRATEGIC_PCT: f64 = 10.0;
/// Tier 4: minimum ratio of strategic to rushed share
pub const TIER4_MIN_STRATEGIC_RUSHED_RATIO: f64 = 2.5;
/// Tier 4: maximum rushed share
pub const TIER4_MAX_RUSHED_PCT: f64 = 20.0;
/// Tier 4: maximum long share
pub const TIER4_MAX_LONG_PCT: f64 = 15.0;
/// Tier 4: minimum mean strategic pause length
pub const TIER4_MIN_MEAN_STRATEGIC_SECS: f64 = 0.2;

/// Tier 3: minimum strategic share, unless the mean length qualifies
pub const TIER3_MIN_STRATEGIC_PCT: f64 = 5.0;
/// Tier 3: minimum mean strategic pause length, unless the share qualifies
pub const TIER3_MIN_MEAN_STRATEGIC_SECS: f64 = 0.15;
/// Tier 3: maximum long share
pub const TIER3_MAX_LONG_PCT: f64 = 20.0;
/// Tier 3: maximum rushed share
pub const TIER3_MAX_RUSHED_PCT: f64 = 35.0;

/// Tier 2: maximum long share
pub const TIER2_MAX_LONG_PCT: f64 = 30.0;
/// Tier 2: maximum rushed share
pub const TIER2_MAX_RUSHED_PCT: f64 = 50.0;

/// Cap at 3: mean strategic length below which short pauses are alignment artefacts
pub const CAP3_MAX_MEAN_STRATEGIC_SECS: f64 = 0.2;
/// Cap at 3: applies only while the strategic share is below this
pub const CAP3_MAX_STRATEGIC_PCT: f64 = 15.0;

/// Minimum net benefit (strategic minus rushed minus long) for scores above 3
pub const CAP_NET_BENEFIT_PCT: f64 = 12.0;
/// Below the net benefit, a strategic share under this caps the score at 2 instead of 3
pub const CAP_NET_BENEFIT_MIN_STRATEGIC_PCT: f64 = 20.0;

/// Strategic share below which the final score never exceeds 2
pub const CLAMP_MIN_STRATEGIC_PCT: f64 = 6.0;
/// Low strategic share that caps at 2 when combined with too many rushed pauses
pub const CLAMP_LOW_STRATEGIC_PCT: f64 = 8.0;
/// Rushed share that, with a low strategic share, caps the final score at 2
pub const CLAMP_MAX_RUSHED_PCT: f64 = 10.0;

/// Pace analysis thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceThresholds {
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,

    /// Window step in seconds
    #[serde(default = "default_window_step_secs")]
    pub window_step_secs: f64,

    /// Below this the window is too slow
    #[serde(default = "default_too_slow_below_wpm")]
    pub too_slow_below_wpm: f64,

    /// Above this the window is too fast
    #[serde(default = "default_too_fast_above_wpm")]
    pub too_fast_above_wpm: f64,

    /// Recommended average range, lower edge
    #[serde(default = "default_target_min_wpm")]
    pub target_min_wpm: f64,

    /// Recommended average range, upper edge
    #[serde(default = "default_target_max_wpm")]
    pub target_max_wpm: f64,
}

impl Default for PaceThresholds {
    fn default() -> Self {
        Self {
            window_secs: PACE_WINDOW_SECS,
            window_step_secs: PACE_WINDOW_STEP_SECS,
            too_slow_below_wpm: TOO_SLOW_BELOW_WPM,
            too_fast_above_wpm: TOO_FAST_ABOVE_WPM,
            target_min_wpm: TARGET_MIN_WPM,
            target_max_wpm: TARGET_MAX_WPM,
        }
    }
}

/// Pause classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseThresholds {
    /// Pauses needed before quartile thresholds are used
    #[serde(default = "default_quartile_min_pauses")]
    pub quartile_min_pauses: usize,

    /// Strategic band lower edge in seconds
    #[serde(default = "default_strategic_min_secs")]
    pub strategic_min_secs: f64,

    /// Strategic band upper edge in seconds
    #[serde(default = "default_strategic_max_secs")]
    pub strategic_max_secs: f64,

    /// Rushed threshold floor when derived from quartiles
    #[serde(default = "default_rushed_floor_secs")]
    pub rushed_floor_secs: f64,

    /// Rushed threshold ceiling when derived from quartiles
    #[serde(default = "default_rushed_ceiling_secs")]
    pub rushed_ceiling_secs: f64,

    /// Long threshold floor when derived from quartiles
    #[serde(default = "default_long_floor_secs")]
    pub long_floor_secs: f64,
}

impl Default for PauseThresholds {
    fn default() -> Self {
        Self {
            quartile_min_pauses: QUARTILE_MIN_PAUSES,
            strategic_min_secs: STRATEGIC_MIN_SECS,
            strategic_max_secs: STRATEGIC_MAX_SECS,
            rushed_floor_secs: RUSHED_FLOOR_SECS,
            rushed_ceiling_secs: RUSHED_CEILING_SECS,
            long_floor_secs: LONG_FLOOR_SECS,
        }
    }
}

fn default_window_secs() -> f64 {
    PACE_WINDOW_SECS
}

fn default_window_step_secs() -> f64 {
    PACE_WINDOW_STEP_SECS
}

fn default_too_slow_below_wpm() -> f64 {
    TOO_SLOW_BELOW_WPM
}

fn default_too_fast_above_wpm() -> f64 {
    TOO_FAST_ABOVE_WPM
}

fn default_target_min_wpm() -> f64 {
    TARGET_MIN_WPM
}

fn default_target_max_wpm() -> f64 {
    TARGET_MAX_WPM
}

fn default_quartile_min_pauses() -> usize {
    QUARTILE_MIN_PAUSES
}

fn default_strategic_min_secs() -> f64 {
    STRATEGIC_MIN_SECS
}

fn default_strategic_max_secs() -> f64 {
    STRATEGIC_MAX_SECS
}

fn default_rushed_floor_secs() -> f64 {
    RUSHED_FLOOR_SECS
}

fn default_rushed_ceiling_secs() -> f64 {
    RUSHED_CEILING_SECS
}

fn default_long_floor_secs() -> f64 {
    LONG_FLOOR_SECS
}
