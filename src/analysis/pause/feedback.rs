/*!
 * Pause report synthesis and rubric scoring.
 *
 * The report text and the 1-5 score are deterministic functions of the
 * classified pauses. A coaching model may contribute the actionable
 * feedback paragraph and nudge the score up by one point, but only when
 * the underlying mix of pauses already looks excellent.
 */

use serde_json::Value;
use std::collections::BTreeMap;

use crate::analysis::pause::classify::{ClassifiedPauses, PauseLabel};
use crate::analysis::pause::extract::Pause;
use crate::analysis::report::PauseReport;
use crate::analysis::thresholds::*;
use crate::analysis::timefmt::{format_percentage, format_timestamp, parse_percentage};
use crate::generation::integer_value;

/// Overview when the transcript carries no usable timestamps
pub const NO_TIMESTAMPS_OVERVIEW: &str =
    "No word-level timestamps provided; unable to analyse pauses.";

/// Feedback when the transcript carries no usable timestamps
pub const NO_TIMESTAMPS_FEEDBACK: &str =
    "Please re-upload the audio so that word timings are included.";

/// Overview when no pause category has any entries
pub const GOOD_OVERVIEW: &str = "Good pause management overall";

/// Detail line accompanying [`GOOD_OVERVIEW`]
pub const GOOD_DETAIL: &str = "✅ Pause patterns support clear communication";

/// Deterministic part of the pause report
#[derive(Debug, Clone, PartialEq)]
pub struct PauseSummary {
    /// Comma-joined category counts
    pub overview: String,
    /// Timestamped examples, at most two per category
    pub details: Vec<String>,
    /// Share of all pauses per label
    pub distribution: BTreeMap<PauseLabel, String>,
}

/// Build the overview, the example lines and the distribution
pub fn synthesize(classified: &ClassifiedPauses) -> PauseSummary {
    let thresholds = &classified.thresholds;
    let mut summaries: Vec<String> = Vec::new();
    let mut details: Vec<String> = Vec::new();

    for label in [PauseLabel::Long, PauseLabel::Rushed, PauseLabel::Strategic] {
        let count = classified.count(label);
        if count == 0 {
            continue;
        }

        details.extend(
            classified
                .with_label(label)
                .take(MAX_DETAILS_PER_CATEGORY)
                .map(|pause| detail_line(label, pause)),
        );

        summaries.push(match label {
            PauseLabel::Long => format!("{} overly long pauses (> {:.2}s)", count, thresholds.long),
            PauseLabel::Rushed => format!("{} rushed transitions (< {:.2}s)", count, thresholds.rushed),
            _ => format!("{} well-placed strategic pauses", count),
        });
    }

    let overview = if summaries.is_empty() {
        details.push(GOOD_DETAIL.to_string());
        GOOD_OVERVIEW.to_string()
    } else {
        summaries.join(", ")
    };

    let distribution = if classified.total() > 0 {
        PauseLabel::ALL
            .iter()
            .map(|label| (*label, format_percentage(classified.fraction(*label))))
            .collect()
    } else {
        BTreeMap::new()
    };

    PauseSummary {
        overview,
        details,
        distribution,
    }
}

fn detail_line(label: PauseLabel, pause: &Pause) -> String {
    let timestamp = format_timestamp(pause.start);
    match label {
        PauseLabel::Long => format!(
            "⚠️ Long pause ({:.1}s) after '{}' at {}: consider a short linking phrase to keep the flow.",
            pause.duration, pause.before_word, timestamp
        ),
        PauseLabel::Rushed => format!(
            "⚠️ Rushed transition ({:.1}s) between '{}' → '{}' at {}: add a tiny pause so listeners can follow.",
            pause.duration, pause.before_word, pause.after_word, timestamp
        ),
        _ => format!(
            "✅ Good pause ({:.1}s) before '{}' at {}: nice emphasis.",
            pause.duration, pause.after_word, timestamp
        ),
    }
}

/// Percentages the rubric is evaluated on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseStatistics {
    /// Long pauses, percent of all pauses
    pub long_pct: f64,
    /// Rushed transitions, percent of all pauses
    pub rushed_pct: f64,
    /// Strategic pauses, percent of all pauses
    pub strategic_pct: f64,
    /// Mean strategic pause length in seconds, 0 when there are none
    pub mean_strategic_duration: f64,
}

impl PauseStatistics {
    /// Read the shares back from the rendered distribution so the score
    /// agrees with the percentages the report shows
    pub fn from_summary(summary: &PauseSummary, classified: &ClassifiedPauses) -> Self {
        let pct = |label: PauseLabel| {
            summary
                .distribution
                .get(&label)
                .and_then(|text| parse_percentage(text))
                .unwrap_or(0.0)
        };

        Self {
            long_pct: pct(PauseLabel::Long),
            rushed_pct: pct(PauseLabel::Rushed),
            strategic_pct: pct(PauseLabel::Strategic),
            mean_strategic_duration: classified.mean_duration(PauseLabel::Strategic),
        }
    }

    /// Whether the mix satisfies the excellent tier, ignoring pause length
    pub fn has_excellent_mix(&self) -> bool {
        self.strategic_pct >= TIER5_MIN_STRATEGIC_PCT
            && self.rushed_pct <= TIER5_MAX_RUSHED_PCT
            && self.long_pct <= TIER5_MAX_LONG_PCT
    }
}

/// Rubric score before any coaching input
pub fn heuristic_score(stats: &PauseStatistics) -> u8 {
    let PauseStatistics {
        long_pct,
        rushed_pct,
        strategic_pct,
        mean_strategic_duration,
    } = *stats;

    let strategic_rushed_ratio = if rushed_pct > 0.0 {
        strategic_pct / rushed_pct
    } else {
        f64::INFINITY
    };

    let mut score = if stats.has_excellent_mix()
        && mean_strategic_duration >= TIER5_MIN_MEAN_STRATEGIC_SECS
    {
        5
    } else if strategic_pct >= TIER4_MIN_STRATEGIC_PCT
        && strategic_rushed_ratio >= TIER4_MIN_STRATEGIC_RUSHED_RATIO
        && rushed_pct <= TIER4_MAX_RUSHED_PCT
        && long_pct <= TIER4_MAX_LONG_PCT
        && mean_strategic_duration >= TIER4_MIN_MEAN_STRATEGIC_SECS
    {
        4
    } else if (strategic_pct >= TIER3_MIN_STRATEGIC_PCT
        || mean_strategic_duration >= TIER3_MIN_MEAN_STRATEGIC_SECS)
        && long_pct <= TIER3_MAX_LONG_PCT
        && rushed_pct <= TIER3_MAX_RUSHED_PCT
    {
        3
    } else if long_pct <= TIER2_MAX_LONG_PCT && rushed_pct <= TIER2_MAX_RUSHED_PCT {
        2
    } else {
        1
    };

    // Very short "strategic" pauses are usually alignment jitter
    if mean_strategic_duration < CAP3_MAX_MEAN_STRATEGIC_SECS && strategic_pct < CAP3_MAX_STRATEGIC_PCT {
        score = score.min(3);
    }

    if strategic_pct - rushed_pct - long_pct < CAP_NET_BENEFIT_PCT {
        let cap = if strategic_pct < CAP_NET_BENEFIT_MIN_STRATEGIC_PCT { 2 } else { 3 };
        score = score.min(cap);
    }

    score
}

/// Combine the heuristic with an optional coaching score, then apply the
/// final clamps shared by both paths
pub fn final_score(heuristic: u8, proposed: Option<i64>, stats: &PauseStatistics) -> u8 {
    let mut score = match proposed {
        Some(proposed) if proposed > i64::from(heuristic) && stats.has_excellent_mix() => {
            (heuristic + 1).min(5)
        }
        _ => heuristic,
    }
    .clamp(1, 5);

    if stats.strategic_pct < CLAMP_MIN_STRATEGIC_PCT {
        score = score.min(2);
    }
    if stats.strategic_pct < CLAMP_LOW_STRATEGIC_PCT && stats.rushed_pct > CLAMP_MAX_RUSHED_PCT {
        score = score.min(2);
    }

    score
}

/// Templated advice used when no coaching text is available
pub fn fallback_feedback(details: &[String]) -> String {
    let first_ref = details.first().map(String::as_str).unwrap_or("your answer");
    format!(
        "Try to slow down or add a thoughtful pause {}. Well-timed breaths before key points \
         (around half a second) help ideas land more clearly.",
        first_ref
    )
}

/// Coaching model contribution
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingAdvice {
    /// Feedback paragraph
    pub actionable_feedback: String,
    /// Proposed 1-5 score
    pub score: Option<i64>,
}

impl CoachingAdvice {
    /// Read advice out of a schema-validated coaching response
    pub fn from_value(value: &Value) -> Option<Self> {
        let actionable_feedback = value.get("actionable_feedback")?.as_str()?.trim().to_string();
        Some(Self {
            actionable_feedback,
            score: value.get("score").and_then(integer_value),
        })
    }
}

/// Assemble the final report
pub fn build_report(summary: PauseSummary, stats: &PauseStatistics, coaching: Option<CoachingAdvice>) -> PauseReport {
    let heuristic = heuristic_score(stats);

    let (actionable_feedback, proposed) = match coaching {
        Some(advice) if !advice.actionable_feedback.is_empty() => (advice.actionable_feedback, advice.score),
        Some(advice) => (fallback_feedback(&summary.details), advice.score),
        None => (fallback_feedback(&summary.details), None),
    };

    PauseReport {
        overview: summary.overview,
        details: summary.details,
        distribution: summary.distribution,
        actionable_feedback,
        score: final_score(heuristic, proposed, stats),
    }
}

/// Report for transcripts without usable word timings
pub fn no_timestamps_report() -> PauseReport {
    PauseReport {
        overview: NO_TIMESTAMPS_OVERVIEW.to_string(),
        details: Vec::new(),
        distribution: BTreeMap::new(),
        actionable_feedback: NO_TIMESTAMPS_FEEDBACK.to_string(),
        score: 1,
    }
}
