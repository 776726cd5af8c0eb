//! Infrastructure layer wiring concrete adapters (corpus ingestion, lexical
//! engine, chat API client).

pub mod corpus;
pub mod lexical;
#[cfg(feature = "llm-backend")]
pub mod llm;

pub use corpus::{sample_corpus, CsvCorpusStore};
pub use lexical::{SimilarityRanker, TfidfVectorizer};
#[cfg(feature = "llm-backend")]
pub use llm::ChatCompletionClient;
