//! Prompt construction.
//!
//! Pure functions over already-extracted text. Truncation happens upstream
//! in the extractor; these only refuse inputs that would produce a prompt
//! with nothing to answer about.

use std::fmt;

use crate::error::AppError;

/// How long and in what shape the summary should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Short,
    Detailed,
    BulletPoints,
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummaryStyle::Short => "Short Summary",
            SummaryStyle::Detailed => "Detailed Summary",
            SummaryStyle::BulletPoints => "Bullet Points",
        })
    }
}

/// Language the summary is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLanguage {
    English,
    French,
    Spanish,
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputLanguage::English => "English",
            OutputLanguage::French => "French",
            OutputLanguage::Spanish => "Spanish",
        })
    }
}

/// Combine document text and a free-text question into one prompt.
pub fn question_prompt(document_text: &str, question: &str) -> Result<String, AppError> {
    if document_text.trim().is_empty() {
        return Err(AppError::EmptyInput("document".into()));
    }
    if question.trim().is_empty() {
        return Err(AppError::EmptyInput("question".into()));
    }

    Ok(format!(
        "Here is a document:\n\n{document_text}\n\nQuestion: {question}\n\nAnswer clearly and concisely."
    ))
}

/// Ask for a summary of `content` in the requested style and language.
pub fn summary_prompt(
    content: &str,
    style: SummaryStyle,
    language: OutputLanguage,
) -> Result<String, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::EmptyInput("page content".into()));
    }

    Ok(format!(
        "You are a helpful assistant. Read the following webpage content and provide a {style}.\n\
         Make sure your response is in {language}.\n\n\
         Webpage Content:\n{content}\n"
    ))
}
