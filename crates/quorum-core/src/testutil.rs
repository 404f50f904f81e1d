//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::provider::ProviderKind;
use crate::traits::{Cleaner, Completer, CompleterFactory, Fetcher};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockCleaner
// ---------------------------------------------------------------------------

/// Mock cleaner that returns the input unchanged, or a queued error.
#[derive(Clone)]
pub struct MockCleaner {
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockCleaner {
    pub fn passthrough() -> Self {
        Self {
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl Cleaner for MockCleaner {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        Ok(html.to_string())
    }
}

// ---------------------------------------------------------------------------
// MockCompleter / MockCompleterFactory
// ---------------------------------------------------------------------------

/// Mock completer that pops queued responses, counting calls and
/// recording every prompt it was sent.
#[derive(Clone)]
pub struct MockCompleter {
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    default_answer: String,
}

impl MockCompleter {
    pub fn answering(answer: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            default_answer: answer.to_string(),
        }
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            default_answer: "ok".to_string(),
        }
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Completer for MockCompleter {
    async fn complete(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_answer.clone())
        } else {
            responses.remove(0)
        }
    }
}

/// Mock factory handing out a shared [`MockCompleter`] and counting how
/// many completers it was asked to build.
#[derive(Clone)]
pub struct MockCompleterFactory {
    completer: MockCompleter,
    create_error: Arc<Mutex<Option<AppError>>>,
    created: Arc<Mutex<usize>>,
}

impl MockCompleterFactory {
    /// Every created completer answers `answer`.
    pub fn answering(answer: &str) -> Self {
        Self {
            completer: MockCompleter::answering(answer),
            create_error: Arc::new(Mutex::new(None)),
            created: Arc::new(Mutex::new(0)),
        }
    }

    /// Created completers pop from a shared response queue.
    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            completer: MockCompleter::with_responses(responses),
            create_error: Arc::new(Mutex::new(None)),
            created: Arc::new(Mutex::new(0)),
        }
    }

    /// The first `create` call fails with `error`.
    pub fn failing_creation(error: AppError) -> Self {
        Self {
            completer: MockCompleter::answering("unreachable"),
            create_error: Arc::new(Mutex::new(Some(error))),
            created: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of `create` calls made so far.
    pub fn created(&self) -> usize {
        *self.created.lock().unwrap()
    }

    /// Number of completion calls across all created completers.
    pub fn completions(&self) -> usize {
        self.completer.calls()
    }

    /// Every prompt sent through created completers, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.completer.prompts()
    }
}

impl CompleterFactory for MockCompleterFactory {
    type Completer = MockCompleter;

    fn create(&self, _kind: ProviderKind, _api_key: &str) -> Result<MockCompleter, AppError> {
        *self.created.lock().unwrap() += 1;
        if let Some(e) = self.create_error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.completer.clone())
    }
}
