//! Answer requester: forwards the original question to the hosted model and
//! always hands back a displayable string.

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::{AnswerModel, GeminiClient, LlmError};
use crate::config::Config;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful and concise Question-and-Answering system. Provide a direct and accurate answer to the user's question.";

pub const NOT_INITIALIZED: &str = "ERROR: LLM client is not initialized. Check server logs.";

const API_ERROR_PREFIX: &str = "An error occurred with the LLM API: ";

/// Either a ready model client or the reason it could not be built.
pub enum AnswerRequester {
    Ready(Arc<dyn AnswerModel>),
    Unavailable { reason: String },
}

impl std::fmt::Debug for AnswerRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(model) => f
                .debug_tuple("Ready")
                .field(&format_args!("{}/{}", model.provider(), model.model()))
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

impl AnswerRequester {
    /// Build the configured client; a failure leaves the requester unavailable
    /// instead of aborting startup.
    pub fn from_config(config: &Config) -> Self {
        let init = GeminiClient::from_config(config).map(|c| Arc::new(c) as Arc<dyn AnswerModel>);
        Self::from_init(init)
    }

    pub fn from_init(init: Result<Arc<dyn AnswerModel>, LlmError>) -> Self {
        match init {
            Ok(model) => {
                info!(
                    "LLM client ready (provider={}, model={})",
                    model.provider(),
                    model.model()
                );
                Self::Ready(model)
            }
            Err(e) => {
                warn!("Error initializing LLM client: {}", e);
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Ask the model. Failures come back as text, never as an error.
    pub async fn get_answer(&self, question: &str) -> String {
        let model = match self {
            Self::Ready(model) => model,
            Self::Unavailable { .. } => return NOT_INITIALIZED.to_string(),
        };

        match model.generate(SYSTEM_INSTRUCTION, question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("LLM call failed: {}", e);
                format!("{}{}", API_ERROR_PREFIX, e)
            }
        }
    }
}
