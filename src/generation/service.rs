/*!
 * Provider-backed text generation.
 *
 * `GenerationService` owns one HTTP client for the configured provider,
 * asks for JSON output where the provider supports it, recovers the JSON
 * object from the raw reply and validates it against the request schema.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Instant;
use url::Url;

use crate::app_config::{GenerationConfig, LlmProvider};
use crate::errors::ProviderError;
use crate::generation::json::parse_json_object;
use crate::generation::{GenerationRequest, TextGenerator};
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;

/// Parse an endpoint string into host and port
fn parse_endpoint(endpoint: &str) -> Result<(String, u16)> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("Invalid host in endpoint: {}", endpoint))?
        .to_string();

    let port = url
        .port()
        .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });

    Ok((host, port))
}

/// Provider implementation variants
#[derive(Debug)]
enum ProviderImpl {
    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// LM Studio local server (OpenAI-compatible)
    LMStudio {
        /// Client instance (OpenAI-compatible)
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Text generator backed by a configured LLM provider
#[derive(Debug)]
pub struct GenerationService {
    /// Provider implementation
    provider: ProviderImpl,

    /// Which provider is configured
    provider_type: LlmProvider,

    /// Model name
    model: String,

    /// Maximum tokens per response
    max_tokens: u32,
}

impl GenerationService {
    /// Create a generation service from configuration
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let timeout = config.get_timeout();
        let model = config.get_model();

        let provider = match config.provider {
            LlmProvider::Ollama => {
                let endpoint = config.get_endpoint();
                let (host, port) = parse_endpoint(&endpoint)?;
                let host = if endpoint.starts_with("https://") {
                    format!("https://{}", host)
                } else {
                    host
                };
                ProviderImpl::Ollama {
                    client: Ollama::new(host, port, timeout),
                }
            }
            LlmProvider::OpenAI => ProviderImpl::OpenAI {
                client: OpenAI::new(config.get_api_key(), config.get_endpoint(), timeout),
            },
            LlmProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };
                ProviderImpl::LMStudio {
                    client: OpenAI::new(api_key, config.get_endpoint(), timeout),
                }
            }
            LlmProvider::Anthropic => ProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), config.get_endpoint(), timeout),
            },
        };

        Ok(Self {
            provider,
            provider_type: config.provider.clone(),
            model,
            max_tokens: config.common.max_tokens,
        })
    }

    /// Send the prompts and return the raw reply text
    async fn complete_text(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let user_content = user_message(request);

        match &self.provider {
            ProviderImpl::Ollama { client } => {
                let chat = ChatRequest::new(&self.model, Vec::new())
                    .add_message("system", &request.system_prompt)
                    .add_message("user", user_content)
                    .temperature(request.temperature)
                    .max_tokens(self.max_tokens)
                    .format("json")
                    .no_stream();
                let response = client.complete(chat).await?;
                Ok(Ollama::extract_text(&response))
            }
            ProviderImpl::OpenAI { client } => {
                let chat = OpenAIRequest::new(&self.model)
                    .add_message("system", &request.system_prompt)
                    .add_message("user", user_content)
                    .temperature(request.temperature)
                    .max_tokens(self.max_tokens)
                    .json_mode();
                let response = client.complete(chat).await?;
                Ok(OpenAI::extract_text(&response))
            }
            ProviderImpl::LMStudio { client } => {
                // Not every local model honours response_format, the prompt carries the shape
                let chat = OpenAIRequest::new(&self.model)
                    .add_message("system", &request.system_prompt)
                    .add_message("user", user_content)
                    .temperature(request.temperature)
                    .max_tokens(self.max_tokens);
                let response = client.complete(chat).await?;
                Ok(OpenAI::extract_text(&response))
            }
            ProviderImpl::Anthropic { client } => {
                let message = AnthropicRequest::new(&self.model, self.max_tokens)
                    .system(&request.system_prompt)
                    .add_message("user", user_content)
                    .temperature(request.temperature);
                let response = client.complete(message).await?;
                Ok(Anthropic::extract_text(&response))
            }
        }
    }
}

/// Build the user turn: the content followed by the expected JSON shape
fn user_message(request: &GenerationRequest) -> String {
    let shape = format!(
        "Respond with a single JSON object of the form {}.",
        request.schema.describe()
    );
    if request.user_content.trim().is_empty() {
        shape
    } else {
        format!("{}\n\n{}", request.user_content, shape)
    }
}

#[async_trait]
impl TextGenerator for GenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, ProviderError> {
        let start_time = Instant::now();
        let text = self.complete_text(request).await?;
        debug!(
            "{} answered '{}' in {:?} ({} chars)",
            self.describe(),
            request.schema.name,
            start_time.elapsed(),
            text.chars().count()
        );

        let value = parse_json_object(&text)?;
        request.schema.validate(&value)?;
        Ok(value)
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.provider_type, self.model)
    }
}
