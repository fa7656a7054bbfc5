//! LLM gateway module
//!
//! One trait, one HTTP implementation, one typed error taxonomy. The rest of
//! the engine only ever sees `Arc<dyn LlmClient>` and raw response text.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{ChatMessage, ChatRequest, Role, temperature};

use crate::config::LlmConfig;

/// Create the gateway client from configuration
///
/// Fails fast on missing credentials - no unauthenticated call is ever
/// attempted.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(model = %config.model, "create_client: called");
    Ok(Arc::new(OpenAiClient::from_config(config)?))
}
