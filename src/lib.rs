/*!
 * # pausewise - speech pacing and pause analysis
 *
 * A Rust library that scores how a candidate speaks, from a transcript with
 * per-word timestamps.
 *
 * ## Features
 *
 * - Pace: sliding-window words-per-minute, pace range classification and a
 *   0-5 pace score with narrative feedback
 * - Pauses: inter-word gap extraction, distribution-aware classification into
 *   long, rushed, strategic and normal pauses, and a 1-5 rubric score
 * - Optional LLM assistance through various providers:
 *   - Ollama (local LLM)
 *   - OpenAI API (and OpenAI-compatible LM Studio)
 *   - Anthropic API
 * - Deterministic fallback whenever the LLM is disabled, slow or failing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: Word-timestamped transcript records and tolerant ingestion
 * - `analysis`: The pace and pause pipelines:
 *   - `analysis::pace`: Pace metrics and scoring
 *   - `analysis::pause`: Pause extraction, classification and feedback
 *   - `analysis::engine`: `SpeechAnalyzer`, timeouts and cancellation
 * - `generation`: Structured text generation used for pause suggestions and coaching
 * - `providers`: Client implementations for various LLM providers:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod generation;
pub mod providers;
pub mod transcript;

// Re-export main types for easier usage
pub use analysis::{AnalysisReport, PaceResult, PauseReport, SpeechAnalyzer};
pub use app_config::Config;
pub use errors::{AnalysisError, ProviderError};
pub use generation::{MockGenerator, TextGenerator};
pub use transcript::{Transcript, Word};
