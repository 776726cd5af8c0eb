//! Conversational chatbot binary backed by the hosted chat-completion API.
//!
//! Presents the same command surface as the retrieval binary, so callers can
//! swap backends without changing how they invoke or parse output.
//!
//! # Environment Variables
//!
//! - `GROQ_API_KEY`: API key for the chat endpoint (unless configured)
//! - `SAHAYAK_LOG`: logging level (trace, debug, info, warn, error)

#[cfg(feature = "llm-backend")]
fn main() {
    sahayak::run_llm();
}

#[cfg(not(feature = "llm-backend"))]
fn main() {
    eprintln!(
        "[sahayak-llm] build with `--features llm-backend` to enable the conversational backend."
    );
    std::process::exit(1);
}
