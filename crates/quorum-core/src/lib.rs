pub mod dispatch;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod testutil;
pub mod traits;

pub use dispatch::Dispatcher;
pub use error::AppError;
pub use models::{DOCUMENT_CHAR_BUDGET, Document, PAGE_CHAR_BUDGET, QueryResult, SourceKind};
pub use pipeline::{AskService, SummarizeService};
pub use prompt::{OutputLanguage, SummaryStyle};
pub use provider::{Credentials, ProviderKind, ProviderSpec};
pub use traits::{Cleaner, Completer, CompleterFactory, Fetcher};
