use thiserror::Error;

/// Application-wide error types for Quorum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Uploaded file has an extension we cannot extract text from.
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    /// Document bytes could not be parsed at all (e.g. corrupt PDF).
    #[error("Document error: {0}")]
    DocumentError(String),

    /// Fetching a web page failed (bad scheme, transport error, non-2xx).
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// HTML-to-text conversion failed.
    #[error("Cleaner error: {0}")]
    CleanerError(String),

    /// A required input (document, question, page content) was empty.
    #[error("{0} must not be empty")]
    EmptyInput(String),

    /// No API key configured for a provider. Contained per provider.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// Provider API returned a non-success status.
    #[error("Provider error (HTTP {status_code}): {message}")]
    ApiError {
        message: String,
        status_code: u16,
        retryable: bool,
    },

    /// Provider returned a 2xx response we could not use.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

impl AppError {
    /// Returns true if this error is transient and worth retrying.
    ///
    /// Informational only — Quorum performs no retries itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkError(_) | AppError::Timeout(_) => true,
            AppError::ApiError { retryable, .. } => *retryable,
            _ => false,
        }
    }
}
