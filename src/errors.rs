/*!
 * Error types for the pausewise application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a text-generation provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not finish within the caller's deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response parsed as JSON but did not match the requested schema
    #[error("Response does not match schema: {0}")]
    SchemaViolation(String),

    /// The caller abandoned the request
    #[error("Request cancelled")]
    Cancelled,
}

/// Errors raised inside the analysis pipelines.
///
/// None of these escape the public analysis entry points; they are
/// recovered locally into degraded results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Empty or unusable timestamp data
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The text-generation collaborator failed
    #[error("External service failure: {0}")]
    ExternalServiceFailure(#[from] ProviderError),
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}
