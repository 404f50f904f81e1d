use std::future::Future;

use crate::error::AppError;
use crate::provider::ProviderKind;

/// Fetches the raw body of a web page.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Converts raw HTML into the page's visible text.
pub trait Cleaner: Send + Sync + Clone {
    fn clean(&self, html: &str) -> Result<String, AppError>;
}

/// Sends one completion request to an LLM backend.
pub trait Completer: Send + Sync + Clone {
    /// Sends the prompt to `model` and returns the answer text.
    fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Builds a [`Completer`] for a provider kind once its credential has been
/// resolved. The dispatcher consults this per call, so a missing credential
/// never constructs a client.
pub trait CompleterFactory: Send + Sync + Clone {
    type Completer: Completer;

    fn create(&self, kind: ProviderKind, api_key: &str) -> Result<Self::Completer, AppError>;
}
