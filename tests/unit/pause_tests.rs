/*!
 * Tests for the pause pipeline
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pausewise::analysis::pause::feedback::{fallback_feedback, GOOD_DETAIL, GOOD_OVERVIEW};
use pausewise::analysis::pause::{
    classify_pauses, extract_pauses, find_pause_indices, synthesize, ClassificationThresholds,
    PauseLabel, PauseStatistics, ThresholdSource,
};
use pausewise::analysis::timefmt::parse_percentage;
use pausewise::analysis::{AnalysisSettings, PauseThresholds, SpeechAnalyzer};
use pausewise::transcript::{Transcript, Word};

use crate::common;

fn offline() -> SpeechAnalyzer {
    SpeechAnalyzer::offline(AnalysisSettings::default())
}

fn gaps(short: f64, short_count: usize, long: f64, long_count: usize) -> Vec<f64> {
    let mut gaps = vec![short; short_count];
    gaps.extend(std::iter::repeat(long).take(long_count));
    gaps
}

/// Test that a transcript without words short-circuits with score 1
#[tokio::test]
async fn test_analyzePauses_withNoWords_shouldReportMissingTimestamps() {
    let report = offline().analyze_pauses(&Transcript::default()).await;

    assert_eq!(report.score, 1);
    assert!(report.overview.contains("No word-level timestamps"));
    assert!(report.details.is_empty());
    assert!(report.distribution.is_empty());
}

/// Test the literal nine-pause input: 2.0s falls in the strategic band and
/// 0.05s is above the quartile-derived rushed cut
#[tokio::test]
async fn test_analyzePauses_withShortAndTwoSecondGaps_shouldFollowQuartileThresholds() {
    let transcript = common::transcript_with_gaps(&gaps(0.05, 7, 2.0, 2));
    let pauses = extract_pauses(&transcript.words);
    assert_eq!(pauses.len(), 9);

    let thresholds =
        ClassificationThresholds::derive(&pauses, &transcript.words, &PauseThresholds::default());
    assert_eq!(thresholds.source, ThresholdSource::Quartile);
    assert!((thresholds.rushed - 0.025).abs() < 1e-6);
    assert!((thresholds.long - 3.075).abs() < 1e-6);

    let report = offline().analyze_pauses(&transcript).await;
    assert_eq!(report.distribution[&PauseLabel::Strategic], "22.2%");
    assert_eq!(report.distribution[&PauseLabel::Normal], "77.8%");
    assert_eq!(report.distribution[&PauseLabel::Rushed], "0.0%");
    assert_eq!(report.distribution[&PauseLabel::Long], "0.0%");
    assert_eq!(report.overview, "2 well-placed strategic pauses");
    assert_eq!(report.score, 5);
}

/// Test a rushed-heavy answer without recommendations or coaching
#[tokio::test]
async fn test_analyzePauses_withMostlyRushedTransitions_shouldScoreLowWithTemplate() {
    let transcript = common::transcript_with_gaps(&gaps(0.01, 7, 0.3, 2));

    let report = offline().analyze_pauses(&transcript).await;

    assert_eq!(report.distribution[&PauseLabel::Rushed], "77.8%");
    assert_eq!(report.distribution[&PauseLabel::Strategic], "22.2%");
    assert_eq!(report.distribution[&PauseLabel::Long], "0.0%");
    assert_eq!(
        report.overview,
        "7 rushed transitions (< 0.02s), 2 well-placed strategic pauses"
    );
    assert!(report.score <= 2);
    assert_eq!(report.score, 1);

    // Two rushed examples, then two strategic ones
    assert_eq!(report.details.len(), 4);
    assert!(report.details[0].contains("Rushed transition"));
    assert!(report.details[0].contains("'w0' → 'w1'"));
    assert!(report.details[2].contains("Good pause"));

    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
    assert!(report.actionable_feedback.contains(&report.details[0]));
}

/// Test that an answer with no gaps at all gets the neutral summary
#[tokio::test]
async fn test_analyzePauses_withTouchingWords_shouldReportGoodManagement() {
    let report = offline().analyze_pauses(&common::steady_transcript()).await;

    assert_eq!(report.overview, GOOD_OVERVIEW);
    assert_eq!(report.details, vec![GOOD_DETAIL.to_string()]);
    assert!(report.distribution.is_empty());
    assert_eq!(report.score, 2);
    assert!(report.actionable_feedback.contains(GOOD_DETAIL));
}

/// Test that fewer than eight pauses use the speaking-rate thresholds
#[test]
fn test_derive_withFewPauses_shouldUseWpmScaledThresholds() {
    let transcript = common::transcript_with_gaps(&[0.05, 0.5, 0.8, 0.02]);
    let pauses = extract_pauses(&transcript.words);
    assert_eq!(pauses.len(), 4);

    let thresholds =
        ClassificationThresholds::derive(&pauses, &transcript.words, &PauseThresholds::default());
    assert_eq!(thresholds.source, ThresholdSource::WpmScaled);
}

/// Test quartile thresholds lowered to two pauses on a three-word answer
#[tokio::test]
async fn test_analyzePauses_withQuartilesOverTwoPauses_shouldClampRushedToFloor() {
    let transcript = common::transcript_with_gaps(&[0.1, 0.5]);
    let mut settings = AnalysisSettings::default();
    settings.pause.quartile_min_pauses = 2;

    let pauses = extract_pauses(&transcript.words);
    let thresholds = ClassificationThresholds::derive(&pauses, &transcript.words, &settings.pause);
    assert_eq!(thresholds.source, ThresholdSource::Quartile);
    assert_eq!(thresholds.rushed, settings.pause.rushed_floor_secs);

    let report = SpeechAnalyzer::offline(settings).analyze_pauses(&transcript).await;
    assert_eq!(report.distribution.len(), 4);
    assert!((1..=5).contains(&report.score));
}

/// Test alignment when the model drops one of a repeated phrase
#[test]
fn test_findPauseIndices_withDroppedDuplicateWord_shouldRecoverIndex() {
    let words: Vec<Word> = "I think I think we should go"
        .split_whitespace()
        .enumerate()
        .map(|(i, w)| Word::new(w, i as f64, i as f64 + 0.5))
        .collect();

    let indices = find_pause_indices(&words, "I think [PAUSE] I we should [PAUSE] go");
    assert_eq!(indices, vec![2]);
}

/// Test that a quoted response and a leading marker are tolerated
#[test]
fn test_findPauseIndices_withQuotesAndLeadingMarker_shouldIgnoreIndexZero() {
    let words: Vec<Word> = ["so", "first", "we", "scale"]
        .iter()
        .enumerate()
        .map(|(i, w)| Word::new(*w, i as f64, i as f64 + 0.5))
        .collect();

    let indices = find_pause_indices(&words, "\"[PAUSE] so [PAUSE] first we [PAUSE] scale [PAUSE]\"");
    assert_eq!(indices, vec![1, 3]);
}

/// Test that the exemption protects only the rushed label
#[test]
fn test_classifyPauses_withRecommendedIndex_shouldExemptRushedOnly() {
    let transcript = common::transcript_with_gaps(&[0.01, 3.0]);
    let pauses = extract_pauses(&transcript.words);
    let thresholds = ClassificationThresholds {
        long: 2.0,
        rushed: 0.1,
        strategic_min: 0.15,
        strategic_max: 2.5,
        source: ThresholdSource::WpmScaled,
    };

    let plain = classify_pauses(&pauses, thresholds, &[]);
    assert_eq!(plain.labelled[0].1, PauseLabel::Rushed);
    assert_eq!(plain.labelled[1].1, PauseLabel::Long);

    let exempted = classify_pauses(&pauses, thresholds, &[1, 2]);
    assert_eq!(exempted.labelled[0].1, PauseLabel::Normal);
    assert_eq!(exempted.labelled[1].1, PauseLabel::Long);
}

/// Test that reclassification is stable
#[test]
fn test_classifyPauses_repeated_shouldAssignSameLabels() {
    let transcript = common::transcript_with_gaps(&[0.01, 0.2, 0.05, 3.0, 0.12, 0.4, 0.01, 2.6, 0.3]);
    let pauses = extract_pauses(&transcript.words);
    let thresholds =
        ClassificationThresholds::derive(&pauses, &transcript.words, &PauseThresholds::default());

    let first = classify_pauses(&pauses, thresholds, &[3]);
    let second = classify_pauses(&pauses, thresholds, &[3]);
    assert_eq!(first, second);
}

/// Test partition and score bounds over random transcripts
#[test]
fn test_pausePipeline_withRandomTranscripts_shouldPartitionAndBound() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = PauseThresholds::default();

    for _ in 0..200 {
        let count = rng.random_range(1..40);
        let gaps: Vec<f64> = (0..count)
            .map(|_| match rng.random_range(0..4) {
                0 => rng.random_range(0.001..0.08),
                1 => rng.random_range(0.08..0.15),
                2 => rng.random_range(0.15..2.5),
                _ => rng.random_range(2.5..6.0),
            })
            .collect();
        let transcript = common::transcript_with_gaps(&gaps);

        let pauses = extract_pauses(&transcript.words);
        assert!(pauses.len() < transcript.word_count());
        assert!(pauses.iter().all(|p| p.duration > 0.0));

        let thresholds = ClassificationThresholds::derive(&pauses, &transcript.words, &config);
        let classified = classify_pauses(&pauses, thresholds, &[]);
        let counted: usize = PauseLabel::ALL.iter().map(|l| classified.count(*l)).sum();
        assert_eq!(counted, classified.total());

        let summary = synthesize(&classified);
        let sum: f64 = summary
            .distribution
            .values()
            .filter_map(|v| parse_percentage(v))
            .sum();
        assert!((sum - 100.0).abs() <= 0.3, "distribution sums to {}", sum);

        let stats = PauseStatistics::from_summary(&summary, &classified);
        let report = pausewise::analysis::pause::build_report(summary, &stats, None);
        assert!((1..=5).contains(&report.score));
    }
}
