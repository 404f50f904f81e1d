//! Provider dispatch.
//!
//! Sends one prompt to one or more configured backends, strictly in order,
//! and converts every per-provider failure into an error result instead of
//! letting it abort the run. Every spec passed in produces exactly one
//! [`QueryResult`], success or not.

use std::time::Instant;

use crate::error::AppError;
use crate::models::QueryResult;
use crate::provider::{Credentials, ProviderSpec};
use crate::traits::{Completer, CompleterFactory};

/// Fans a prompt out to configured providers, one blocking call at a time.
#[derive(Clone)]
pub struct Dispatcher<F: CompleterFactory> {
    credentials: Credentials,
    factory: F,
}

impl<F: CompleterFactory> Dispatcher<F> {
    pub fn new(credentials: Credentials, factory: F) -> Self {
        Self {
            credentials,
            factory,
        }
    }

    /// Query every provider in `specs`, in order. Failures are contained:
    /// a provider that errors still yields a result, and the next provider
    /// is attempted unconditionally.
    pub async fn fan_out(&self, specs: &[ProviderSpec], prompt: &str) -> Vec<QueryResult> {
        let mut results = Vec::with_capacity(specs.len());
        for spec in specs {
            results.push(self.query(spec, prompt).await);
        }
        results
    }

    /// Query exactly one provider, with the same isolation contract.
    pub async fn single(&self, spec: &ProviderSpec, prompt: &str) -> QueryResult {
        self.query(spec, prompt).await
    }

    async fn query(&self, spec: &ProviderSpec, prompt: &str) -> QueryResult {
        let Some(api_key) = self.credentials.for_kind(spec.kind) else {
            tracing::warn!(provider = %spec.name, "no API key configured, skipping call");
            return failure(spec, Credentials::missing(spec.kind));
        };

        let completer = match self.factory.create(spec.kind, api_key) {
            Ok(completer) => completer,
            Err(e) => return failure(spec, e),
        };

        tracing::info!(provider = %spec.name, model = %spec.model, "calling provider");
        let start = Instant::now();
        match completer.complete(&spec.model, prompt).await {
            Ok(answer) => QueryResult {
                provider: spec.name.clone(),
                model: spec.model.clone(),
                elapsed: Some(start.elapsed()),
                outcome: Ok(answer),
            },
            Err(e) => {
                tracing::warn!(provider = %spec.name, error = %e, "provider call failed");
                failure(spec, e)
            }
        }
    }
}

/// An error result. Elapsed is absent: the call did not complete.
fn failure(spec: &ProviderSpec, error: AppError) -> QueryResult {
    QueryResult {
        provider: spec.name.clone(),
        model: spec.model.clone(),
        elapsed: None,
        outcome: Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;
    use crate::testutil::*;

    fn openai_credentials() -> Credentials {
        Credentials {
            openai: Some("sk-test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fan_out_yields_one_result_per_spec_in_order() {
        let factory = MockCompleterFactory::answering("blue");
        let dispatcher = Dispatcher::new(openai_credentials(), factory);

        let panel = ProviderSpec::question_panel();
        let results = dispatcher.fan_out(&panel, "What color is the sky?").await;

        assert_eq!(results.len(), panel.len());
        for (result, spec) in results.iter().zip(&panel) {
            assert_eq!(result.provider, spec.name);
            assert_eq!(result.outcome.as_deref().unwrap(), "blue");
            assert!(result.elapsed.is_some());
        }
    }

    #[tokio::test]
    async fn failing_provider_does_not_stop_the_run() {
        let factory = MockCompleterFactory::with_responses(vec![
            Err(AppError::NetworkError("connection refused".into())),
            Ok("second answer".into()),
        ]);
        let dispatcher = Dispatcher::new(openai_credentials(), factory);

        let specs = vec![
            ProviderSpec::new("first", ProviderKind::OpenAi, "model-a"),
            ProviderSpec::new("second", ProviderKind::OpenAi, "model-b"),
        ];
        let results = dispatcher.fan_out(&specs, "prompt").await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_error());
        assert!(results[0].elapsed.is_none());
        assert_eq!(results[1].outcome.as_deref().unwrap(), "second answer");
        assert!(results[1].elapsed.is_some());
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_the_call() {
        let factory = MockCompleterFactory::answering("never seen");
        // No Cohere key configured.
        let dispatcher = Dispatcher::new(openai_credentials(), factory.clone());

        let spec = ProviderSpec::summarizer(ProviderKind::Cohere);
        let result = dispatcher.single(&spec, "prompt").await;

        assert!(result.elapsed.is_none());
        assert!(matches!(result.outcome, Err(AppError::MissingCredential(_))));
        // Neither the factory nor the network path was touched.
        assert_eq!(factory.created(), 0);
        assert_eq!(factory.completions(), 0);
    }

    #[tokio::test]
    async fn missing_credential_does_not_stop_later_providers() {
        let factory = MockCompleterFactory::answering("ok");
        let dispatcher = Dispatcher::new(openai_credentials(), factory.clone());

        let specs = vec![
            ProviderSpec::summarizer(ProviderKind::Groq),
            ProviderSpec::new("gpt-4.1", ProviderKind::OpenAi, "gpt-4.1"),
        ];
        let results = dispatcher.fan_out(&specs, "prompt").await;

        assert!(matches!(
            results[0].outcome,
            Err(AppError::MissingCredential(_))
        ));
        assert_eq!(results[1].outcome.as_deref().unwrap(), "ok");
        assert_eq!(factory.created(), 1);
    }

    #[tokio::test]
    async fn factory_error_is_contained() {
        let factory =
            MockCompleterFactory::failing_creation(AppError::NetworkError("bad tls".into()));
        let dispatcher = Dispatcher::new(openai_credentials(), factory);

        let spec = ProviderSpec::new("gpt-4.1", ProviderKind::OpenAi, "gpt-4.1");
        let result = dispatcher.single(&spec, "prompt").await;

        assert!(result.is_error());
        assert!(result.elapsed.is_none());
    }
}
