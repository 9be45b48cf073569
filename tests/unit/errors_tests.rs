/*!
 * Tests for error types
 */

use pausewise::errors::{AnalysisError, ProviderError};

/// Test provider error messages
#[test]
fn test_providerError_display_shouldDescribeFailure() {
    let err = ProviderError::ApiError {
        status_code: 429,
        message: "rate limited".to_string(),
    };
    assert!(err.to_string().contains("429"));
    assert!(err.to_string().contains("rate limited"));

    let err = ProviderError::Timeout("pause coaching exceeded 20s".to_string());
    assert!(err.to_string().contains("pause coaching exceeded 20s"));
}

/// Test wrapping of provider failures into analysis errors
#[test]
fn test_errorConversions_fromProviderError_shouldWrap() {
    let analysis: AnalysisError = ProviderError::Cancelled.into();
    assert_eq!(analysis, AnalysisError::ExternalServiceFailure(ProviderError::Cancelled));
    assert!(analysis.to_string().contains("Request cancelled"));
}

/// Test that JSON errors become parse errors
#[test]
fn test_providerError_fromSerdeJson_shouldBeParseError() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ProviderError = json_err.into();
    assert!(matches!(err, ProviderError::ParseError(_)));
}

/// Test that application-level failures surface through anyhow with context
#[test]
fn test_analysisError_intoAnyhow_shouldKeepSource() {
    use anyhow::Context;

    let result: Result<(), AnalysisError> = Err(AnalysisError::InsufficientData("no timed words".to_string()));
    let err = result.context("Pace analysis failed").unwrap_err();

    assert_eq!(err.to_string(), "Pace analysis failed");
    assert!(format!("{:#}", err).contains("no timed words"));
    assert!(err.downcast_ref::<AnalysisError>().is_some());
}
