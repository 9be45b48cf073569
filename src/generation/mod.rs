/*!
 * Text-generation capability used by the analysis engine.
 *
 * The engine never talks to a provider directly. It depends on the
 * `TextGenerator` trait, which takes a system prompt, user content and the
 * response schema, and returns a schema-conforming JSON object:
 * - `service`: provider-backed implementation built from configuration
 * - `mock`: deterministic test double
 * - `json`: recovery of JSON objects from chatty model output
 */

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::ProviderError;

pub mod json;
pub mod mock;
pub mod service;

pub use mock::{MockBehavior, MockGenerator};
pub use service::GenerationService;

/// A structured text-generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generate a JSON object conforming to `request.schema`
    ///
    /// # Arguments
    /// * `request` - Prompts and expected response shape
    ///
    /// # Returns
    /// * `Result<Value, ProviderError>` - The validated JSON object or an error
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, ProviderError>;

    /// Short description for logs, e.g. `openai/gpt-4o-mini`
    fn describe(&self) -> String;
}

/// Kind of value a schema field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string
    String,
    /// An integer; whole floats and numeric strings are accepted
    Integer,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

/// Expected shape of a structured response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    /// Schema name, used in logs and provider JSON modes
    pub name: String,
    /// Required fields and their kinds
    pub fields: Vec<(String, FieldKind)>,
}

impl ResponseSchema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required field
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Check that `value` is an object carrying every field with the right kind
    pub fn validate(&self, value: &Value) -> Result<(), ProviderError> {
        let object = value.as_object().ok_or_else(|| {
            ProviderError::SchemaViolation(format!("{}: response is not an object", self.name))
        })?;

        for (field, kind) in &self.fields {
            let present = object.get(field).ok_or_else(|| {
                ProviderError::SchemaViolation(format!("{}: missing field '{}'", self.name, field))
            })?;
            let ok = match kind {
                FieldKind::String => present.is_string(),
                FieldKind::Integer => integer_value(present).is_some(),
            };
            if !ok {
                return Err(ProviderError::SchemaViolation(format!(
                    "{}: field '{}' is not a {}",
                    self.name,
                    field,
                    kind.name()
                )));
            }
        }

        Ok(())
    }

    /// Compact description for prompts, e.g. `{"score": integer}`
    pub fn describe(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(name, kind)| format!("\"{}\": {}", name, kind.name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", fields)
    }
}

/// A structured generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Instructions for the model
    pub system_prompt: String,
    /// Content to operate on; may be empty when the prompt is self-contained
    pub user_content: String,
    /// Expected response shape
    pub schema: ResponseSchema,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a deterministic (temperature 0) request
    pub fn new(
        system_prompt: impl Into<String>,
        user_content: impl Into<String>,
        schema: ResponseSchema,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_content: user_content.into(),
            schema,
            temperature: 0.0,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Read an integer out of a JSON value, tolerating `4.0` and `"4"`
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
