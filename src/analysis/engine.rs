/*!
 * The speech analysis engine.
 *
 * `SpeechAnalyzer` runs the pace and pause pipelines over one transcript.
 * The text generator is injected at construction; every call to it is
 * bounded by a timeout and can be abandoned through a `CancelSignal`.
 * Failures of the generator are logged and replaced by the deterministic
 * fallback, so the public entry points always return a complete result.
 */

use anyhow::Result;
use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::analysis::pace::evaluate_pace;
use crate::analysis::pause::classify::{classify_pauses, ClassificationThresholds};
use crate::analysis::pause::extract::extract_pauses;
use crate::analysis::pause::feedback::{
    build_report, no_timestamps_report, synthesize, CoachingAdvice, PauseStatistics,
};
use crate::analysis::pause::prompts::{coaching_prompt, coaching_schema};
use crate::analysis::pause::recommend::request_pause_indices;
use crate::analysis::report::{AnalysisReport, PaceResult, PauseReport};
use crate::analysis::thresholds::{PaceThresholds, PauseThresholds};
use crate::app_config::Config;
use crate::errors::{AnalysisError, ProviderError};
use crate::generation::{GenerationRequest, GenerationService, TextGenerator};
use crate::transcript::Transcript;

/// Tunables for one analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Deadline for each text-generation call
    pub llm_timeout: Duration,
    /// Sampling temperature for text-generation calls
    pub temperature: f32,
    /// Pace thresholds
    pub pace: PaceThresholds,
    /// Pause thresholds
    pub pause: PauseThresholds,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            llm_timeout: Duration::from_secs(20),
            temperature: 0.0,
            pace: PaceThresholds::default(),
            pause: PauseThresholds::default(),
        }
    }
}

impl AnalysisSettings {
    /// Settings taken from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            llm_timeout: config.analysis.llm_timeout(),
            temperature: config.generation.common.temperature,
            pace: config.analysis.pace.clone(),
            pause: config.analysis.pause.clone(),
        }
    }

    /// Set the text-generation deadline
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }
}

/// Fires a cancellation
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Abandon outstanding text-generation calls
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observes a cancellation
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once cancellation is requested; pend forever if it never is
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a connected cancel handle and signal
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelSignal { receiver })
}

/// Speech pacing and pause analysis engine
#[derive(Debug, Clone)]
pub struct SpeechAnalyzer {
    generator: Option<Arc<dyn TextGenerator>>,
    settings: AnalysisSettings,
}

impl SpeechAnalyzer {
    /// Create an analyzer that consults `generator`
    pub fn new(generator: Arc<dyn TextGenerator>, settings: AnalysisSettings) -> Self {
        Self {
            generator: Some(generator),
            settings,
        }
    }

    /// Create an analyzer that never calls a text generator
    pub fn offline(settings: AnalysisSettings) -> Self {
        Self {
            generator: None,
            settings,
        }
    }

    /// Create an analyzer from configuration, with a provider-backed
    /// generator when LLM use is enabled
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = AnalysisSettings::from_config(config);
        if !config.analysis.enable_llm {
            return Ok(Self::offline(settings));
        }

        let service = GenerationService::from_config(&config.generation)?;
        debug!("Analyzer using text generator {}", service.describe());
        Ok(Self::new(Arc::new(service), settings))
    }

    /// Analyzer settings
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Whether a text generator is configured
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Pace pipeline. Returns the `-1` sentinel when data is insufficient.
    pub fn analyze_pace(&self, transcript: &Transcript) -> PaceResult {
        evaluate_pace(&transcript.repaired_words(), &self.settings.pace)
    }

    /// Pause pipeline
    pub async fn analyze_pauses(&self, transcript: &Transcript) -> PauseReport {
        self.analyze_pauses_with_cancel(transcript, &CancelSignal::never())
            .await
    }

    /// Pause pipeline that abandons text generation once `cancel` fires
    pub async fn analyze_pauses_with_cancel(
        &self,
        transcript: &Transcript,
        cancel: &CancelSignal,
    ) -> PauseReport {
        let words = &transcript.words;
        if words.is_empty() {
            return no_timestamps_report();
        }

        let pauses = extract_pauses(words);

        let recommended = match &self.generator {
            Some(generator) => {
                let call = request_pause_indices(generator.as_ref(), words, self.settings.temperature);
                match self.bounded("pause suggestion", cancel, call).await {
                    Ok(indices) => indices,
                    Err(e) => {
                        warn!("{}; continuing without pause recommendations", e);
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        let thresholds = ClassificationThresholds::derive(&pauses, words, &self.settings.pause);
        let classified = classify_pauses(&pauses, thresholds, &recommended);
        let summary = synthesize(&classified);
        let stats = PauseStatistics::from_summary(&summary, &classified);

        let coaching = match &self.generator {
            Some(generator) => {
                let request = GenerationRequest::new(
                    coaching_prompt(&summary.distribution, &summary.details),
                    "",
                    coaching_schema(),
                )
                .temperature(self.settings.temperature);
                match self.bounded("pause coaching", cancel, generator.generate(&request)).await {
                    Ok(value) => CoachingAdvice::from_value(&value),
                    Err(e) => {
                        warn!("{}; using templated pause feedback", e);
                        None
                    }
                }
            }
            None => None,
        };

        build_report(summary, &stats, coaching)
    }

    /// Run both pipelines concurrently
    pub async fn analyze(&self, transcript: &Transcript) -> AnalysisReport {
        self.analyze_with_cancel(transcript, &CancelSignal::never())
            .await
    }

    /// Run both pipelines concurrently, abandoning text generation once
    /// `cancel` fires
    pub async fn analyze_with_cancel(
        &self,
        transcript: &Transcript,
        cancel: &CancelSignal,
    ) -> AnalysisReport {
        let (pace, pause) = tokio::join!(
            async { self.analyze_pace(transcript) },
            self.analyze_pauses_with_cancel(transcript, cancel)
        );
        AnalysisReport { pace, pause }
    }

    /// Await a generator call under the timeout and the cancel signal
    async fn bounded<T>(
        &self,
        what: &str,
        cancel: &CancelSignal,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, AnalysisError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled.into());
        }

        let timeout = self.settings.llm_timeout;
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::Cancelled),
            result = tokio::time::timeout(timeout, call) => match result {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(format!("{} exceeded {:?}", what, timeout))),
            },
        };

        outcome.map_err(|e| {
            debug!("{} failed: {}", what, e);
            AnalysisError::ExternalServiceFailure(e)
        })
    }
}
