//! Provider identities and credential configuration.
//!
//! Backends are a closed set: each [`ProviderKind`] selects both the wire
//! client and the credential used to authenticate against it, so adding a
//! provider is a compile-checked change rather than a string comparison.

use crate::error::AppError;

/// One hosted LLM backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI platform (`api.openai.com`).
    OpenAi,
    /// Cohere chat API.
    Cohere,
    /// Groq, served over its OpenAI-compatible endpoint.
    Groq,
}

impl ProviderKind {
    /// Environment variable holding this provider's API key.
    pub fn credential_key(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Cohere => "COHERE_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Cohere => "Cohere",
            ProviderKind::Groq => "Groq",
        }
    }
}

/// One configured backend: display name, backend family, model id.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    pub name: String,
    pub kind: ProviderKind,
    pub model: String,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>, kind: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            model: model.into(),
        }
    }

    /// The fixed panel queried by document Q&A, in display order.
    pub fn question_panel() -> Vec<ProviderSpec> {
        ["gpt-3.5-turbo", "gpt-4.1", "gpt-5-chat-latest", "gpt-5-nano"]
            .into_iter()
            .map(|model| ProviderSpec::new(model, ProviderKind::OpenAi, model))
            .collect()
    }

    /// The default summarizer backend for a provider family.
    pub fn summarizer(kind: ProviderKind) -> ProviderSpec {
        let model = match kind {
            ProviderKind::OpenAi => "gpt-4.1",
            ProviderKind::Cohere => "command-r-plus",
            ProviderKind::Groq => "llama-3.3-70b-versatile",
        };
        ProviderSpec::new(format!("{} ({})", kind.label(), model), kind, model)
    }
}

/// API keys for every supported provider, resolved once at startup and
/// passed explicitly into the dispatcher. A missing key is a per-provider
/// error at call time, never a startup failure.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai: Option<String>,
    pub cohere: Option<String>,
    pub groq: Option<String>,
}

impl Credentials {
    /// Read all provider keys from the environment.
    pub fn from_env() -> Self {
        Self {
            openai: read_key(ProviderKind::OpenAi),
            cohere: read_key(ProviderKind::Cohere),
            groq: read_key(ProviderKind::Groq),
        }
    }

    pub fn for_kind(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_deref(),
            ProviderKind::Cohere => self.cohere.as_deref(),
            ProviderKind::Groq => self.groq.as_deref(),
        }
    }

    /// The error reported when `kind` has no key configured.
    pub fn missing(kind: ProviderKind) -> AppError {
        AppError::MissingCredential(kind.credential_key().to_string())
    }
}

fn read_key(kind: ProviderKind) -> Option<String> {
    std::env::var(kind.credential_key())
        .ok()
        .filter(|v| !v.trim().is_empty())
}
