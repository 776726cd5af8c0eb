//! Lexical retrieval engine: TF-IDF vectorization plus cosine ranking over
//! the fitted corpus.

pub mod ranker;
pub mod stopwords;
pub mod tfidf;

pub use ranker::SimilarityRanker;
pub use tfidf::{TfidfVectorizer, VectorSpace};
