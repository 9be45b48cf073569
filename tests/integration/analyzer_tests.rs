/*!
 * Integration tests for the analyzer with a mocked text generator
 */

use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pausewise::analysis::pause::feedback::fallback_feedback;
use pausewise::analysis::pause::PauseLabel;
use pausewise::analysis::{cancel_pair, AnalysisSettings, SpeechAnalyzer};
use pausewise::generation::{GenerationRequest, MockGenerator};
use pausewise::transcript::Transcript;

use crate::common;

fn analyzer(mock: &MockGenerator) -> SpeechAnalyzer {
    SpeechAnalyzer::new(Arc::new(mock.clone()), AnalysisSettings::default())
}

/// Seven near-touching transitions and two measured pauses
fn rushed_answer() -> Transcript {
    let mut gaps = vec![0.01; 7];
    gaps.extend([0.3, 0.3]);
    common::transcript_with_gaps(&gaps)
}

/// Seven comfortable transitions and three short strategic pauses
fn polished_answer() -> Transcript {
    let mut gaps = vec![0.1; 7];
    gaps.extend([0.22, 0.22, 0.22]);
    common::transcript_with_gaps(&gaps)
}

fn coaching(feedback: &str, score: i64) -> serde_json::Value {
    json!({"actionable_feedback": feedback, "score": score})
}

/// Test that a failing coach leaves the deterministic report in place
#[tokio::test]
async fn test_analyzePauses_withFailingGenerator_shouldMatchOfflineReport() {
    common::init_logging();
    let transcript = rushed_answer();
    let mock = MockGenerator::failing();

    let report = analyzer(&mock).analyze_pauses(&transcript).await;
    let offline = SpeechAnalyzer::offline(AnalysisSettings::default())
        .analyze_pauses(&transcript)
        .await;

    assert_eq!(report, offline);
    assert_eq!(report.distribution[&PauseLabel::Rushed], "77.8%");
    assert!(report.score <= 2);
    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
    assert_eq!(mock.request_count(), 2);
}

/// Test that malformed replies are treated as failures
#[tokio::test]
async fn test_analyzePauses_withMalformedGenerator_shouldFallBack() {
    let transcript = rushed_answer();
    let report = analyzer(&MockGenerator::malformed()).analyze_pauses(&transcript).await;

    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
    assert_eq!(report.score, 1);
}

/// Test that a non-integer coaching score counts as a failed call
#[tokio::test]
async fn test_analyzePauses_withFractionalScore_shouldUseTemplate() {
    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response(
            "pause_coaching",
            json!({"actionable_feedback": "Lovely.", "score": 4.5}),
        );

    let report = analyzer(&mock).analyze_pauses(&polished_answer()).await;
    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
    assert_eq!(report.score, 4);
}

/// Test that the coach can lift an excellent mix by one point
#[tokio::test]
async fn test_analyzePauses_withGenerousCoachOnExcellentMix_shouldUpgradeByOne() {
    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("Great emphasis before 'w8' (00:03).", 5));

    let report = analyzer(&mock).analyze_pauses(&polished_answer()).await;

    assert_eq!(report.distribution[&PauseLabel::Strategic], "30.0%");
    assert_eq!(report.distribution[&PauseLabel::Normal], "70.0%");
    assert_eq!(report.actionable_feedback, "Great emphasis before 'w8' (00:03).");
    assert_eq!(report.score, 5);
}

/// Test that the coach can neither lower the score nor lift a weak mix
#[tokio::test]
async fn test_analyzePauses_withCoachScores_shouldNeverOverrideRubric() {
    let harsh = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("Needs work.", 1));
    assert_eq!(analyzer(&harsh).analyze_pauses(&polished_answer()).await.score, 4);

    let generous = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("Perfect!", 5));
    assert_eq!(analyzer(&generous).analyze_pauses(&rushed_answer()).await.score, 1);

    let out_of_range = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("Wow.", 42));
    assert_eq!(analyzer(&out_of_range).analyze_pauses(&polished_answer()).await.score, 5);
}

/// Test that a blank coaching paragraph is replaced by the template
#[tokio::test]
async fn test_analyzePauses_withBlankCoachingFeedback_shouldUseTemplate() {
    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("   ", 3));

    let report = analyzer(&mock).analyze_pauses(&rushed_answer()).await;
    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
}

/// Test that recommended positions are not counted as rushed
#[tokio::test]
async fn test_analyzePauses_withRecommendations_shouldExemptRushedTransitions() {
    let transcript = rushed_answer();
    let mut annotated: Vec<String> = transcript.words.iter().map(|w| w.word.clone()).collect();
    annotated.insert(1, "[PAUSE]".to_string());
    annotated.insert(3, "[PAUSE]".to_string());

    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": annotated.join(" ")}))
        .with_response("pause_coaching", coaching("Keep going.", 2));

    let report = analyzer(&mock).analyze_pauses(&transcript).await;
    assert!(report.overview.starts_with("5 rushed transitions"));
    assert_eq!(report.distribution[&PauseLabel::Normal], "22.2%");
}

/// Test that the coaching prompt carries the statistics and the examples
#[tokio::test]
async fn test_analyzePauses_coachingRequest_shouldCarryStatistics() {
    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("ok", 2));

    let report = analyzer(&mock).analyze_pauses(&rushed_answer()).await;
    let requests: Vec<GenerationRequest> = mock.recorded_requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].schema.name, "pause_suggestion");
    assert!(requests[0].system_prompt.contains("\"w0 w1 w2 w3 w4 w5 w6 w7 w8 w9\""));

    let prompt = &requests[1].system_prompt;
    assert_eq!(requests[1].schema.name, "pause_coaching");
    assert!(prompt.contains("Long pauses : 0.0%"));
    assert!(prompt.contains("Rushed pauses: 77.8%"));
    assert!(prompt.contains("Strategic    : 22.2%"));
    assert!(prompt.contains(&report.details[0]));
}

/// Test that a slow generator is abandoned at the deadline
#[tokio::test]
async fn test_analyzePauses_withSlowGenerator_shouldTimeOutAndFallBack() {
    let mock = MockGenerator::slow(5_000)
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("too late", 5));
    let settings = AnalysisSettings::default().llm_timeout(Duration::from_millis(50));
    let analyzer = SpeechAnalyzer::new(Arc::new(mock.clone()), settings);

    let started = Instant::now();
    let report = analyzer.analyze_pauses(&rushed_answer()).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(report.actionable_feedback, fallback_feedback(&report.details));
    assert_eq!(mock.request_count(), 2);
}

/// Test that cancelling mid-call abandons outstanding generation
#[tokio::test]
async fn test_analyzeWithCancel_cancelledDuringCall_shouldReturnDeterministicReport() {
    let mock = MockGenerator::slow(30_000)
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("never", 5));
    let analyzer = analyzer(&mock);
    let (handle, signal) = cancel_pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let transcript = rushed_answer();
    let started = Instant::now();
    let report = analyzer.analyze_with_cancel(&transcript, &signal).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(mock.request_count(), 1);
    assert_eq!(report.pause.actionable_feedback, fallback_feedback(&report.pause.details));
    assert_eq!(report.pace, analyzer.analyze_pace(&transcript));
}

/// Test that identical inputs give byte-identical reports
#[tokio::test]
async fn test_analyze_repeated_shouldBeDeterministic() {
    let mock = MockGenerator::working()
        .with_response("pause_suggestion", json!({"modified_transcript": "So the [PAUSE] first thing"}))
        .with_response("pause_coaching", coaching("Pause before 'everything' (00:02).", 3));
    let analyzer = analyzer(&mock);
    let transcript = common::interview_answer();

    let first = serde_json::to_string(&analyzer.analyze(&transcript).await).unwrap();
    let second = serde_json::to_string(&analyzer.analyze(&transcript).await).unwrap();
    assert_eq!(first, second);
}

/// Test concurrent analyses sharing one analyzer
#[tokio::test]
async fn test_analyze_concurrentCalls_shouldNotInterfere() {
    let mock = MockGenerator::intermittent(3)
        .with_response("pause_suggestion", json!({"modified_transcript": ""}))
        .with_response("pause_coaching", coaching("ok", 3));
    let analyzer = analyzer(&mock);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let analyzer = analyzer.clone();
            let transcript = if i % 2 == 0 { rushed_answer() } else { polished_answer() };
            tokio::spawn(async move { analyzer.analyze(&transcript).await })
        })
        .collect();

    for handle in handles {
        let report = handle.await.unwrap();
        assert!((1..=5).contains(&report.pause.score));
        assert!((0.0..=5.0).contains(&report.pace.score));
    }
    assert_eq!(mock.request_count(), 16);
}
