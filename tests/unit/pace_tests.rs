/*!
 * Tests for the pace pipeline
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pausewise::analysis::pace::{calculate_pace_metrics, evaluate_pace, score_pace, PaceLabel};
use pausewise::analysis::{AnalysisSettings, PaceThresholds, SpeechAnalyzer};
use pausewise::transcript::{Transcript, Word};

use crate::common;

fn random_transcript(rng: &mut StdRng) -> Transcript {
    let count = rng.random_range(0..60);
    let mut cursor = rng.random_range(0.0..3.0);
    let words = (0..count)
        .map(|i| {
            let start: f64 = cursor;
            // Occasionally zero or negative durations to exercise repair
            let length: f64 = rng.random_range(-0.1..0.6);
            cursor += length.max(0.0) + rng.random_range(0.0..1.5);
            Word::new(format!("w{}", i), start, start + length)
        })
        .collect();
    Transcript::from_words(words)
}

/// Test that an empty transcript yields the insufficient-data sentinel
#[test]
fn test_analyzePace_withNoWords_shouldReturnSentinel() {
    let analyzer = SpeechAnalyzer::offline(AnalysisSettings::default());
    let result = analyzer.analyze_pace(&Transcript::default());

    assert_eq!(result.feedback, "len(words) less than 1");
    assert_eq!(result.score, -1.0);
    assert!(result.is_insufficient());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, serde_json::json!({"feedback": "len(words) less than 1", "score": -1.0}));
}

/// Test a steady 150 WPM answer with no pauses
#[test]
fn test_calculatePaceMetrics_withSteadyIdealPace_shouldScoreFive() {
    let thresholds = PaceThresholds::default();
    let transcript = common::steady_transcript();

    let metrics = calculate_pace_metrics(&transcript.words, &thresholds).unwrap();
    assert_eq!(metrics.avg_wpm, 150.0);
    assert_eq!(metrics.ideal_pct, 100.0);
    assert_eq!(metrics.too_slow_pct, 0.0);
    assert_eq!(metrics.too_fast_pct, 0.0);
    assert_eq!(metrics.window_count, 6);
    assert_eq!(metrics.category(&thresholds), PaceLabel::Ideal);

    assert_eq!(metrics.segments.len(), 1);
    assert_eq!(metrics.segments[0].start, 0.0);
    assert_eq!(metrics.segments[0].end, 10.0);

    let score = score_pace(&metrics, &thresholds);
    assert_eq!(score.accuracy, 40.0);
    assert_eq!(score.consistency, 60.0);
    assert_eq!(score.points(), 100.0);
    assert_eq!(score.five_point(), 5.0);
}

/// Test the rendered feedback of the steady answer
#[test]
fn test_evaluatePace_withSteadyIdealPace_shouldRenderFeedback() {
    let result = evaluate_pace(&common::steady_transcript().words, &PaceThresholds::default());

    assert_eq!(result.score, 5.0);
    assert_eq!(result.wpm, Some(150.0));
    assert_eq!(result.score_percent(), Some(100.0));
    assert!(result.feedback.contains("Your average pace: 150.0 WPM"));
    assert!(result.feedback.contains("Aim for 120-150 WPM in interviews"));
    assert!(result.feedback.contains("You spoke at ideal pace for 100.0% of the time"));
    assert!(result.feedback.contains("Ideal segments:"));
    assert!(result.feedback.contains("- [00:00 - 00:10]: word0 word1"));
    assert!(!result.feedback.contains("Too fast segments:"));
}

/// Test that a machine-gun delivery scores zero
#[test]
fn test_evaluatePace_withVeryFastSpeech_shouldScoreZero() {
    let words: Vec<Word> = (0..60)
        .map(|i| Word::new(format!("w{}", i), i as f64 * 0.1, (i + 1) as f64 * 0.1))
        .collect();
    let thresholds = PaceThresholds::default();

    let metrics = calculate_pace_metrics(&words, &thresholds).unwrap();
    assert_eq!(metrics.too_fast_pct, 100.0);
    assert_eq!(metrics.category(&thresholds), PaceLabel::TooFast);

    let result = evaluate_pace(&words, &thresholds);
    assert_eq!(result.score, 0.0);
    assert!(result.feedback.contains("Too fast segments:"));
}

/// Test that inverted word timings are repaired instead of failing
#[test]
fn test_analyzePace_withInvertedTimings_shouldStillScore() {
    let analyzer = SpeechAnalyzer::offline(AnalysisSettings::default());
    let transcript = Transcript::from_words(vec![
        Word::new("well", 0.0, 0.0),
        Word::new("then", 0.5, 0.2),
        Word::new("yes", 1.0, 1.3),
    ]);

    let result = analyzer.analyze_pace(&transcript);
    assert!(!result.is_insufficient());
    assert!(result.wpm.unwrap() > 0.0);
}

/// Test score bounds and percentage sums over random transcripts
#[test]
fn test_analyzePace_withRandomTranscripts_shouldStayInBounds() {
    let analyzer = SpeechAnalyzer::offline(AnalysisSettings::default());
    let thresholds = PaceThresholds::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let transcript = random_transcript(&mut rng);
        let result = analyzer.analyze_pace(&transcript);

        assert!(
            result.score == -1.0 || (0.0..=5.0).contains(&result.score),
            "score out of range: {}",
            result.score
        );
        assert!(result.wpm.unwrap_or(0.0) >= 0.0);

        if let Ok(metrics) = calculate_pace_metrics(&transcript.words, &thresholds) {
            if metrics.window_count > 0 {
                let sum = metrics.too_slow_pct + metrics.ideal_pct + metrics.too_fast_pct;
                assert!((sum - 100.0).abs() <= 0.3, "percentages sum to {}", sum);
            }
        }
    }
}

/// Test that repeated runs produce identical output
#[test]
fn test_analyzePace_repeated_shouldBeDeterministic() {
    let analyzer = SpeechAnalyzer::offline(AnalysisSettings::default());
    let transcript = common::interview_answer();

    let first = serde_json::to_string(&analyzer.analyze_pace(&transcript)).unwrap();
    let second = serde_json::to_string(&analyzer.analyze_pace(&transcript)).unwrap();
    assert_eq!(first, second);
}
