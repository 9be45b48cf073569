use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;

use crate::analysis::thresholds::{PaceThresholds, PauseThresholds};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Text-generation config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Analysis config
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text-generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl LlmProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Whether the provider cannot work without an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: HTTP timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: LlmProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Text-generation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// Available providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Settings shared by all providers
    #[serde(default)]
    pub common: GenerationCommonConfig,
}

/// Generation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationCommonConfig {
    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Zero keeps repeated analyses of the same transcript identical
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GenerationCommonConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Analysis engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Whether the engine may call the text-generation service
    #[serde(default = "default_true")]
    pub enable_llm: bool,

    /// Deadline for each text-generation call
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Pace thresholds
    #[serde(default)]
    pub pace: PaceThresholds,

    /// Pause thresholds
    #[serde(default)]
    pub pause: PauseThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enable_llm: default_true(),
            llm_timeout_secs: default_llm_timeout_secs(),
            pace: PaceThresholds::default(),
            pause: PauseThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Deadline for each text-generation call
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Equivalent `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_llm_timeout_secs() -> u64 {
    20
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_true() -> bool {
    true
}

fn default_endpoint(provider: &LlmProvider) -> String {
    match provider {
        LlmProvider::Ollama => "http://localhost:11434".to_string(),
        LlmProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        LlmProvider::Anthropic => "https://api.anthropic.com".to_string(),
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        LlmProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

fn default_model(provider: &LlmProvider) -> String {
    match provider {
        LlmProvider::Ollama => "llama3.2:3b".to_string(),
        LlmProvider::OpenAI => "gpt-4o-mini".to_string(),
        LlmProvider::Anthropic => "claude-3-5-haiku-latest".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        LlmProvider::LMStudio => "local-model".to_string(),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.enable_llm && self.generation.provider.requires_api_key() {
            let api_key = self.generation.get_api_key();
            if api_key.is_empty() {
                return Err(anyhow!(
                    "API key is required for {} provider",
                    self.generation.provider.display_name()
                ));
            }
        }

        if self.analysis.llm_timeout_secs == 0 {
            return Err(anyhow!("analysis.llm_timeout_secs must be greater than zero"));
        }

        let pace = &self.analysis.pace;
        if pace.too_slow_below_wpm >= pace.too_fast_above_wpm {
            return Err(anyhow!(
                "Pace bands are inverted: too_slow_below_wpm ({}) must be below too_fast_above_wpm ({})",
                pace.too_slow_below_wpm,
                pace.too_fast_above_wpm
            ));
        }
        if pace.target_min_wpm > pace.target_max_wpm {
            return Err(anyhow!(
                "Target pace range is inverted: {} > {}",
                pace.target_min_wpm,
                pace.target_max_wpm
            ));
        }
        if pace.window_secs <= 0.0 || pace.window_step_secs <= 0.0 {
            return Err(anyhow!("Pace window length and step must be positive"));
        }

        let pause = &self.analysis.pause;
        if pause.strategic_min_secs > pause.strategic_max_secs {
            return Err(anyhow!(
                "Strategic band is inverted: {} > {}",
                pause.strategic_min_secs,
                pause.strategic_max_secs
            ));
        }
        if pause.rushed_floor_secs > pause.rushed_ceiling_secs {
            return Err(anyhow!(
                "Rushed clamp is inverted: {} > {}",
                pause.rushed_floor_secs,
                pause.rushed_ceiling_secs
            ));
        }
        if pause.quartile_min_pauses < 2 {
            return Err(anyhow!(
                "analysis.pause.quartile_min_pauses must be at least 2, got {}",
                pause.quartile_min_pauses
            ));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing a default one if it does not exist
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}

impl GenerationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &LlmProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting defaults if absent
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        match self
            .available_providers
            .iter()
            .position(|p| p.provider_type == provider_str)
        {
            Some(index) => &mut self.available_providers[index],
            None => {
                self.available_providers
                    .push(ProviderConfig::new(self.provider.clone()));
                let last = self.available_providers.len() - 1;
                &mut self.available_providers[last]
            }
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }
        default_model(&self.provider)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Default fallback - Ollama doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }
        default_endpoint(&self.provider)
    }

    /// Get the HTTP timeout for the active provider
    pub fn get_timeout(&self) -> Duration {
        let secs = self
            .get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs);
        Duration::from_secs(secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            available_providers: vec![
                ProviderConfig::new(LlmProvider::Ollama),
                ProviderConfig::new(LlmProvider::OpenAI),
                ProviderConfig::new(LlmProvider::Anthropic),
                ProviderConfig::new(LlmProvider::LMStudio),
            ],
            common: GenerationCommonConfig::default(),
        }
    }
}
