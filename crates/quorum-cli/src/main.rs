mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use quorum_client::{ClientCompleterFactory, HtmdCleaner, ReqwestFetcher, read_document};
use quorum_core::prompt::{OutputLanguage, SummaryStyle};
use quorum_core::provider::{Credentials, ProviderKind, ProviderSpec};
use quorum_core::{AskService, Dispatcher, SummarizeService};

#[derive(Parser)]
#[command(name = "quorum", version, about = "Ask a panel of LLMs about documents and web pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question about a local document, answered by four models side by side
    Ask {
        /// Document to read (.txt or .pdf)
        #[arg(short, long)]
        file: PathBuf,

        /// Question to ask about the document
        #[arg(short, long)]
        question: String,

        /// Print results as JSON instead of text panels
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Summarize a web page with one chosen provider
    Summarize {
        /// Web page URL
        #[arg(short, long)]
        url: String,

        /// Type of summary
        #[arg(short, long, value_enum, default_value = "short")]
        style: StyleArg,

        /// Output language
        #[arg(short, long, value_enum, default_value = "english")]
        language: LanguageArg,

        /// LLM to use
        #[arg(short, long, value_enum, default_value = "openai")]
        provider: ProviderArg,

        /// Print the result as JSON instead of a text panel
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Short,
    Detailed,
    BulletPoints,
}

impl From<StyleArg> for SummaryStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Short => SummaryStyle::Short,
            StyleArg::Detailed => SummaryStyle::Detailed,
            StyleArg::BulletPoints => SummaryStyle::BulletPoints,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    English,
    French,
    Spanish,
}

impl From<LanguageArg> for OutputLanguage {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::English => OutputLanguage::English,
            LanguageArg::French => OutputLanguage::French,
            LanguageArg::Spanish => OutputLanguage::Spanish,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Cohere,
    Groq,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Cohere => ProviderKind::Cohere,
            ProviderArg::Groq => ProviderKind::Groq,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("quorum=info".parse()?)
                .add_directive("quorum_core=info".parse()?)
                .add_directive("quorum_client=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let credentials = Credentials::from_env();

    match cli.command {
        Commands::Ask {
            file,
            question,
            json,
        } => {
            cmd_ask(&file, &question, credentials, json).await?;
        }
        Commands::Summarize {
            url,
            style,
            language,
            provider,
            json,
        } => {
            cmd_summarize(
                &url,
                style.into(),
                language.into(),
                provider.into(),
                credentials,
                json,
            )
            .await?;
        }
    }

    Ok(())
}

async fn cmd_ask(file: &Path, question: &str, credentials: Credentials, json: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let document = read_document(&bytes, extension)?;
    tracing::info!(
        chars = document.text.chars().count(),
        truncated = document.truncated,
        "document extracted"
    );

    let dispatcher = Dispatcher::new(credentials, ClientCompleterFactory::new());
    let service = AskService::new(dispatcher, ProviderSpec::question_panel());

    let results = service.ask(&document, question).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render::render_panels(&results));
    }

    Ok(())
}

async fn cmd_summarize(
    url: &str,
    style: SummaryStyle,
    language: OutputLanguage,
    kind: ProviderKind,
    credentials: Credentials,
    json: bool,
) -> Result<()> {
    let fetcher = ReqwestFetcher::new().context("Failed to create HTTP client")?;
    let dispatcher = Dispatcher::new(credentials, ClientCompleterFactory::new());
    let service = SummarizeService::new(fetcher, HtmdCleaner::new(), dispatcher);

    let spec = ProviderSpec::summarizer(kind);
    let result = service.summarize(url, style, language, &spec).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::render_panels(std::slice::from_ref(&result)));
    }

    Ok(())
}
