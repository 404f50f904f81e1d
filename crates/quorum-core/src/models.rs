use std::time::Duration;

use crate::error::AppError;

/// Maximum characters kept from an uploaded document.
pub const DOCUMENT_CHAR_BUDGET: usize = 3000;

/// Maximum characters kept from a fetched web page.
pub const PAGE_CHAR_BUDGET: usize = 4000;

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    UploadedFile,
    FetchedUrl,
}

/// Plain text extracted from one source, replaced wholesale on the next
/// upload or fetch. Never persisted.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: SourceKind,
    /// Set when the text was cut to a character budget.
    pub truncated: bool,
}

impl Document {
    pub fn new(text: impl Into<String>, source: SourceKind) -> Self {
        Self {
            text: text.into(),
            source,
            truncated: false,
        }
    }

    /// Keep at most `budget` characters of text, recording whether anything
    /// was dropped. Counted in chars, not bytes, so multi-byte text is never
    /// split mid-sequence. Applied once, before prompt construction.
    pub fn truncate_to(mut self, budget: usize) -> Self {
        if self.text.chars().count() > budget {
            self.text = self.text.chars().take(budget).collect();
            self.truncated = true;
            tracing::warn!(
                budget,
                source = ?self.source,
                "content is large, only the first part is used"
            );
        }
        self
    }
}

/// The outcome of querying one provider: the answer or the error, plus the
/// wall-clock time of the call. Elapsed is present only when the call
/// completed successfully.
#[derive(Debug)]
pub struct QueryResult {
    /// Provider display name, e.g. "gpt-4.1" or "Cohere (command-r-plus)".
    pub provider: String,
    /// Model identifier sent to the provider.
    pub model: String,
    pub elapsed: Option<Duration>,
    pub outcome: Result<String, AppError>,
}

impl QueryResult {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }

    /// The text to show in this provider's panel: the answer, or the error
    /// rendered as an inline string.
    pub fn answer_text(&self) -> String {
        match &self.outcome {
            Ok(answer) => answer.clone(),
            Err(e) => format!("Error: {e}"),
        }
    }
}

impl serde::Serialize for QueryResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("QueryResult", 4)?;
        state.serialize_field("provider", &self.provider)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("elapsed_seconds", &self.elapsed.map(|d| d.as_secs_f64()))?;
        match &self.outcome {
            Ok(answer) => state.serialize_field("answer", answer)?,
            Err(e) => state.serialize_field("error", &e.to_string())?,
        }
        state.end()
    }
}
