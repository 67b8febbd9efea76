//! Generation capability: the seam between selection orchestration and any backend
//! that can turn a prompt into structured JSON.
//!
//! `AppState` holds an `Arc<dyn StructuredGenerator>`; tests swap in scripted fakes.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single generation call. Orchestration turns these into retry feedback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Unparseable(String),

    #[error("response does not match {shape}: {message}")]
    SchemaMismatch { shape: String, message: String },
}

/// Prompt payload sent to a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmInvocation {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// The shape a provider response must conform to: a name plus its JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputShape {
    pub name: String,
    pub schema: Value,
}

impl OutputShape {
    pub fn of<T: JsonSchema>() -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: T::schema_name(),
            schema: serde_json::to_value(schema).unwrap_or(Value::Null),
        }
    }

    /// Instruction appended to the system prompt so the model knows the exact shape.
    pub fn instruction(&self) -> String {
        let schema = serde_json::to_string(&self.schema).unwrap_or_default();
        format!(
            "The response must be a single JSON object conforming to the {} JSON Schema:\n{}",
            self.name, schema
        )
    }
}

/// A backend that answers an invocation with a JSON value.
///
/// Implementations classify their own failures into `ProviderError`; they never retry
/// on behalf of the caller beyond transport-level concerns.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate(
        &self,
        invocation: &LlmInvocation,
        shape: &OutputShape,
    ) -> Result<Value, ProviderError>;
}

/// Calls `generator` and deserializes the result into `T`.
///
/// A value that does not fit `T` is reported as `ProviderError::SchemaMismatch`.
pub async fn generate_structured<T>(
    generator: &dyn StructuredGenerator,
    invocation: &LlmInvocation,
    shape: &OutputShape,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let value = generator.generate(invocation, shape).await?;
    serde_json::from_value(value).map_err(|e| ProviderError::SchemaMismatch {
        shape: shape.name.clone(),
        message: e.to_string(),
    })
}
