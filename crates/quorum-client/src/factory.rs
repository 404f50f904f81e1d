//! Maps provider kinds to concrete wire clients.

use quorum_core::error::AppError;
use quorum_core::provider::ProviderKind;
use quorum_core::traits::{Completer, CompleterFactory};

use crate::cohere::CohereCompleter;
use crate::openai::{GROQ_BASE_URL, OpenAiCompleter};

/// One completer per wire shape. Groq shares the OpenAI-compatible client
/// under a different base URL.
#[derive(Clone)]
pub enum AnyCompleter {
    OpenAi(OpenAiCompleter),
    Cohere(CohereCompleter),
}

impl Completer for AnyCompleter {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        match self {
            AnyCompleter::OpenAi(c) => c.complete(model, prompt).await,
            AnyCompleter::Cohere(c) => c.complete(model, prompt).await,
        }
    }
}

/// Builds real HTTP completers for the dispatcher, one per call, with the
/// credential the dispatcher already resolved.
#[derive(Clone, Copy, Default)]
pub struct ClientCompleterFactory;

impl ClientCompleterFactory {
    pub fn new() -> Self {
        Self
    }
}

impl CompleterFactory for ClientCompleterFactory {
    type Completer = AnyCompleter;

    fn create(&self, kind: ProviderKind, api_key: &str) -> Result<AnyCompleter, AppError> {
        Ok(match kind {
            ProviderKind::OpenAi => AnyCompleter::OpenAi(OpenAiCompleter::new(api_key)?),
            ProviderKind::Groq => {
                AnyCompleter::OpenAi(OpenAiCompleter::with_base_url(api_key, GROQ_BASE_URL)?)
            }
            ProviderKind::Cohere => AnyCompleter::Cohere(CohereCompleter::new(api_key)?),
        })
    }
}
