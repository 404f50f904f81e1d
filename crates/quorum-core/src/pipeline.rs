//! Pipeline orchestration: extract → build prompt → dispatch.
//!
//! Generic over all external dependencies via traits, enabling dependency
//! injection and testability without real HTTP or LLM calls. Extraction
//! failures abort the run before any provider is contacted; provider
//! failures are contained inside the dispatcher and never surface as
//! errors here.

use crate::dispatch::Dispatcher;
use crate::error::AppError;
use crate::models::{Document, PAGE_CHAR_BUDGET, QueryResult, SourceKind};
use crate::prompt::{self, OutputLanguage, SummaryStyle};
use crate::provider::ProviderSpec;
use crate::traits::{Cleaner, CompleterFactory, Fetcher};

/// Document Q&A: asks a fixed panel of providers the same question about an
/// already-extracted document and collects every answer.
pub struct AskService<F: CompleterFactory> {
    dispatcher: Dispatcher<F>,
    panel: Vec<ProviderSpec>,
}

impl<F: CompleterFactory> AskService<F> {
    pub fn new(dispatcher: Dispatcher<F>, panel: Vec<ProviderSpec>) -> Self {
        Self { dispatcher, panel }
    }

    /// Run the fan-out. One result per panel member, in panel order.
    pub async fn ask(
        &self,
        document: &Document,
        question: &str,
    ) -> Result<Vec<QueryResult>, AppError> {
        let prompt = prompt::question_prompt(&document.text, question)?;

        tracing::info!(
            chars = document.text.chars().count(),
            truncated = document.truncated,
            providers = self.panel.len(),
            "querying panel"
        );

        Ok(self.dispatcher.fan_out(&self.panel, &prompt).await)
    }
}

/// URL summarization: fetch → clean → truncate → prompt → one provider.
pub struct SummarizeService<H, C, F>
where
    H: Fetcher,
    C: Cleaner,
    F: CompleterFactory,
{
    fetcher: H,
    cleaner: C,
    dispatcher: Dispatcher<F>,
}

impl<H, C, F> SummarizeService<H, C, F>
where
    H: Fetcher,
    C: Cleaner,
    F: CompleterFactory,
{
    pub fn new(fetcher: H, cleaner: C, dispatcher: Dispatcher<F>) -> Self {
        Self {
            fetcher,
            cleaner,
            dispatcher,
        }
    }

    /// Summarize the page at `url` with the given provider.
    ///
    /// Fetch and clean failures abort the run; the provider is then never
    /// contacted. A provider failure still returns `Ok` with an error
    /// result, per the dispatcher's isolation contract.
    pub async fn summarize(
        &self,
        url: &str,
        style: SummaryStyle,
        language: OutputLanguage,
        spec: &ProviderSpec,
    ) -> Result<QueryResult, AppError> {
        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes", html.len());

        let text = self.cleaner.clean(&html)?;
        let page = Document::new(text, SourceKind::FetchedUrl).truncate_to(PAGE_CHAR_BUDGET);

        let prompt = prompt::summary_prompt(&page.text, style, language)?;

        Ok(self.dispatcher.single(spec, &prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DOCUMENT_CHAR_BUDGET;
    use crate::provider::{Credentials, ProviderKind};
    use crate::testutil::*;

    fn openai_credentials() -> Credentials {
        Credentials {
            openai: Some("sk-test".into()),
            ..Default::default()
        }
    }

    fn ask_service(factory: MockCompleterFactory) -> AskService<MockCompleterFactory> {
        AskService::new(
            Dispatcher::new(openai_credentials(), factory),
            ProviderSpec::question_panel(),
        )
    }

    #[tokio::test]
    async fn ask_happy_path_queries_all_four_providers() {
        let factory = MockCompleterFactory::answering("blue");
        let svc = ask_service(factory.clone());

        let document = Document::new("The sky is blue.", SourceKind::UploadedFile)
            .truncate_to(DOCUMENT_CHAR_BUDGET);
        let results = svc.ask(&document, "What color is the sky?").await.unwrap();

        assert_eq!(results.len(), 4);
        for result in &results {
            assert_eq!(result.outcome.as_deref().unwrap(), "blue");
            assert!(result.elapsed.is_some());
        }
        assert_eq!(factory.completions(), 4);

        // Every provider saw both inputs verbatim.
        for prompt in factory.prompts() {
            assert!(prompt.contains("The sky is blue."));
            assert!(prompt.contains("What color is the sky?"));
        }
    }

    #[tokio::test]
    async fn ask_empty_question_aborts_before_dispatch() {
        let factory = MockCompleterFactory::answering("blue");
        let svc = ask_service(factory.clone());

        let document = Document::new("The sky is blue.", SourceKind::UploadedFile);
        let err = svc.ask(&document, "  ").await.unwrap_err();

        assert!(matches!(err, AppError::EmptyInput(_)));
        assert_eq!(factory.created(), 0);
    }

    #[tokio::test]
    async fn ask_empty_document_aborts_before_dispatch() {
        let factory = MockCompleterFactory::answering("blue");
        let svc = ask_service(factory.clone());

        let document = Document::new("", SourceKind::UploadedFile);
        let err = svc.ask(&document, "What color is the sky?").await.unwrap_err();

        assert!(matches!(err, AppError::EmptyInput(_)));
        assert_eq!(factory.created(), 0);
    }

    #[tokio::test]
    async fn summarize_happy_path() {
        let factory = MockCompleterFactory::answering("a short summary");
        let svc = SummarizeService::new(
            MockFetcher::new("<html><p>Article body</p></html>"),
            MockCleaner::passthrough(),
            Dispatcher::new(openai_credentials(), factory),
        );

        let spec = ProviderSpec::summarizer(ProviderKind::OpenAi);
        let result = svc
            .summarize(
                "https://example.com",
                SummaryStyle::Short,
                OutputLanguage::English,
                &spec,
            )
            .await
            .unwrap();

        assert_eq!(result.outcome.as_deref().unwrap(), "a short summary");
        assert!(result.elapsed.is_some());
        assert_eq!(result.provider, "OpenAI (gpt-4.1)");
    }

    #[tokio::test]
    async fn summarize_fetch_failure_never_reaches_a_provider() {
        let factory = MockCompleterFactory::answering("unreachable");
        let svc = SummarizeService::new(
            MockFetcher::with_error(AppError::FetchError("HTTP 404 for https://example.com".into())),
            MockCleaner::passthrough(),
            Dispatcher::new(openai_credentials(), factory.clone()),
        );

        let spec = ProviderSpec::summarizer(ProviderKind::OpenAi);
        let err = svc
            .summarize(
                "https://example.com",
                SummaryStyle::Short,
                OutputLanguage::English,
                &spec,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FetchError(_)));
        assert_eq!(factory.created(), 0);
        assert_eq!(factory.completions(), 0);
    }

    #[tokio::test]
    async fn summarize_clean_failure_never_reaches_a_provider() {
        let factory = MockCompleterFactory::answering("unreachable");
        let svc = SummarizeService::new(
            MockFetcher::new("<html>broken"),
            MockCleaner::with_error(AppError::CleanerError("bad html".into())),
            Dispatcher::new(openai_credentials(), factory.clone()),
        );

        let spec = ProviderSpec::summarizer(ProviderKind::OpenAi);
        let err = svc
            .summarize(
                "https://example.com",
                SummaryStyle::Detailed,
                OutputLanguage::Spanish,
                &spec,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CleanerError(_)));
        assert_eq!(factory.created(), 0);
    }

    #[tokio::test]
    async fn summarize_truncates_long_pages_before_prompting() {
        let long_page = "x".repeat(PAGE_CHAR_BUDGET + 500);
        let factory = MockCompleterFactory::answering("summary");
        let svc = SummarizeService::new(
            MockFetcher::new(&long_page),
            MockCleaner::passthrough(),
            Dispatcher::new(openai_credentials(), factory.clone()),
        );

        let spec = ProviderSpec::summarizer(ProviderKind::OpenAi);
        let result = svc
            .summarize(
                "https://example.com",
                SummaryStyle::Short,
                OutputLanguage::English,
                &spec,
            )
            .await
            .unwrap();

        assert!(!result.is_error());
        // The prompt carries exactly the budget's worth of page content.
        let prompts = factory.prompts();
        assert!(prompts[0].contains(&"x".repeat(PAGE_CHAR_BUDGET)));
        assert!(!prompts[0].contains(&"x".repeat(PAGE_CHAR_BUDGET + 1)));
    }

    #[tokio::test]
    async fn summarize_provider_failure_is_a_result_not_an_error() {
        let factory = MockCompleterFactory::with_responses(vec![Err(AppError::ApiError {
            message: "invalid api key".into(),
            status_code: 401,
            retryable: false,
        })]);
        let svc = SummarizeService::new(
            MockFetcher::new("<p>body</p>"),
            MockCleaner::passthrough(),
            Dispatcher::new(openai_credentials(), factory),
        );

        let spec = ProviderSpec::summarizer(ProviderKind::OpenAi);
        let result = svc
            .summarize(
                "https://example.com",
                SummaryStyle::Short,
                OutputLanguage::English,
                &spec,
            )
            .await
            .unwrap();

        assert!(result.is_error());
        assert!(result.elapsed.is_none());
        assert!(result.answer_text().contains("invalid api key"));
    }
}
