use std::sync::Arc;

use anyhow::{Context, Result};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod settings;

use application::services::{RetrievalSession, SessionConfig};
use domain::{Corpus, DomainError};
use infrastructure::corpus::{sample_corpus, CsvCorpusStore};
use infrastructure::lexical::TfidfVectorizer;
use interfaces::cli::{self, Command, Invocation};
use settings::AppConfig;

/// Entry point for the retrieval-backed `sahayak` binary.
pub fn run() {
    init_tracing();
    let invocation = parse_invocation();
    if let Err(err) = run_retrieval(invocation) {
        eprintln!("[sahayak] {err:?}");
        std::process::exit(1);
    }
}

/// Entry point for the conversational `sahayak-llm` binary.
#[cfg(feature = "llm-backend")]
pub fn run_llm() {
    init_tracing();
    let invocation = parse_invocation();
    if let Err(err) = run_conversational(invocation) {
        eprintln!("[sahayak-llm] {err:?}");
        std::process::exit(1);
    }
}

fn parse_invocation() -> Invocation {
    match cli::parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("[sahayak] {message}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(2);
        }
    }
}

fn run_retrieval(invocation: Invocation) -> Result<()> {
    if invocation.command == Command::Help {
        eprintln!("{}", cli::USAGE);
        return Ok(());
    }

    let mut config = AppConfig::load();
    if let Some(path) = &invocation.dataset {
        config.dataset.path = path.clone();
    }
    if let Err(message) = config.validate() {
        anyhow::bail!("invalid configuration: {message}");
    }

    // Dataset trouble degrades to the built-in sample corpus so the command
    // surface stays available; the session itself is never exposed
    // half-built.
    let session = match build_retrieval_session(&config) {
        Ok(session) => session,
        Err(DomainError::Dataset(err)) => {
            tracing::warn!(
                target: "sahayak",
                %err,
                path = ?config.dataset.path,
                "dataset unavailable; serving the built-in sample corpus"
            );
            build_session(sample_corpus(), &config)
        }
        Err(other) => return Err(other).context("failed to initialise retrieval session"),
    };

    cli::run(&session, &invocation.command)
}

#[cfg(feature = "llm-backend")]
fn run_conversational(invocation: Invocation) -> Result<()> {
    use application::services::ConversationService;
    use infrastructure::llm::ChatCompletionClient;

    if invocation.command == Command::Help {
        eprintln!("{}", cli::USAGE);
        return Ok(());
    }

    let config = AppConfig::load();
    let client = ChatCompletionClient::new(&config.chat)
        .context("failed to initialise chat API client")?;
    let service = ConversationService::new(Arc::new(client));

    cli::run(&service, &invocation.command)
}

/// Load the corpus from disk, fit the vector space, and construct the
/// session. Dataset failures are fatal here; no partially-initialized
/// session ever escapes.
pub fn build_retrieval_session(config: &AppConfig) -> Result<RetrievalSession, DomainError> {
    let corpus = CsvCorpusStore::new(&config.dataset.path).load()?;
    Ok(build_session(corpus, config))
}

fn build_session(corpus: Corpus, config: &AppConfig) -> RetrievalSession {
    let model = Arc::new(TfidfVectorizer::fit(&corpus));
    RetrievalSession::new(
        corpus,
        model,
        SessionConfig {
            threshold: config.retrieval.threshold,
            suggestion_count: config.retrieval.suggestion_count,
        },
    )
}

fn init_tracing() {
    static INIT: std::sync::OnceLock<()> = std::sync::OnceLock::new();

    let _ = INIT.get_or_init(|| {
        let filter = std::env::var("SAHAYAK_LOG").unwrap_or_else(|_| "info".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init();
    });
}
