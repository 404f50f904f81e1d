use std::time::Duration;

use quorum_core::error::AppError;
use quorum_core::traits::Fetcher;
use reqwest::Client;
use url::Url;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP fetcher using reqwest.
///
/// Downloads the raw body of a web page with a fixed User-Agent and
/// timeout. Any failure here — bad scheme, transport error, non-success
/// status — aborts the whole run before a provider is contacted.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("Quorum/0.1 (LLM summarizer)")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::FetchError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        validate_scheme(url)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::FetchError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::FetchError(format!("Failed to read response body: {e}")))
    }
}

/// Only http and https URLs are fetchable.
fn validate_scheme(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::FetchError(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::FetchError(format!(
            "URL scheme '{scheme}' is not allowed (only http/https)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_scheme("http://example.com").is_ok());
        assert!(validate_scheme("https://example.com/page?q=1").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = validate_scheme("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("not allowed"));
        assert!(validate_scheme("ftp://example.com").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = validate_scheme("not a url").unwrap_err();
        assert!(matches!(err, AppError::FetchError(_)));
    }
}
