/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;

use pausewise::analysis::AnalysisSettings;
use pausewise::app_config::{Config, LlmProvider, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.generation.provider, LlmProvider::Ollama);
    assert_eq!(config.generation.get_model(), "llama3.2:3b");
    assert_eq!(config.generation.common.temperature, 0.0);
    assert!(config.analysis.enable_llm);
    assert_eq!(config.analysis.llm_timeout(), Duration::from_secs(20));
    assert_eq!(config.analysis.pace.target_min_wpm, 120.0);
    assert_eq!(config.analysis.pace.target_max_wpm, 150.0);
    assert_eq!(config.analysis.pause.strategic_max_secs, 2.5);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // OpenAI needs a key while the LLM is enabled
    config.generation.provider = LlmProvider::OpenAI;
    assert!(config.validate().is_err());
    config.analysis.enable_llm = false;
    assert!(config.validate().is_ok());
    config.analysis.enable_llm = true;
    config.generation.active_provider_config_mut().api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());

    config.analysis.llm_timeout_secs = 0;
    assert!(config.validate().is_err());
    config.analysis.llm_timeout_secs = 20;

    config.analysis.pace.too_slow_below_wpm = 200.0;
    assert!(config.validate().is_err());
    config.analysis.pace.too_slow_below_wpm = 105.0;

    config.analysis.pause.strategic_min_secs = 3.0;
    assert!(config.validate().is_err());
    config.analysis.pause.strategic_min_secs = 0.15;

    config.analysis.pause.quartile_min_pauses = 1;
    assert!(config.validate().is_err());
    config.analysis.pause.quartile_min_pauses = 2;
    assert!(config.validate().is_ok());
}

/// Test that a missing config file is created with defaults and reloads identically
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(
        serde_json::to_value(&created)?,
        serde_json::to_value(&reloaded)?
    );
    Ok(())
}

/// Test that partial files fall back to defaults for missing sections
#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{"generation": {"provider": "anthropic"}, "analysis": {"llm_timeout_secs": 5, "pause": {"strategic_min_secs": 0.2}}}"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.generation.provider, LlmProvider::Anthropic);
    assert_eq!(config.analysis.llm_timeout_secs, 5);
    assert_eq!(config.analysis.pause.strategic_min_secs, 0.2);
    assert_eq!(config.analysis.pause.strategic_max_secs, 2.5);
    assert!(config.analysis.enable_llm);

    let settings = AnalysisSettings::from_config(&config);
    assert_eq!(settings.llm_timeout, Duration::from_secs(5));
    assert_eq!(settings.pause.strategic_min_secs, 0.2);
    Ok(())
}

/// Test that an unreadable config is reported
#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

/// Test provider name parsing
#[test]
fn test_llmProvider_fromStr_shouldAcceptLowercaseNames() {
    assert_eq!("OpenAI".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
    assert_eq!("lmstudio".parse::<LlmProvider>().unwrap(), LlmProvider::LMStudio);
    assert!("gemini".parse::<LlmProvider>().is_err());
}
