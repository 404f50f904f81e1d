pub mod cleaner;
pub mod cohere;
pub mod factory;
pub mod fetcher;
pub mod openai;
pub mod reader;

pub use cleaner::HtmdCleaner;
pub use cohere::CohereCompleter;
pub use factory::{AnyCompleter, ClientCompleterFactory};
pub use fetcher::ReqwestFetcher;
pub use openai::OpenAiCompleter;
pub use reader::read_document;
