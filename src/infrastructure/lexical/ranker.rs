use std::sync::Arc;

use crate::application::services::LexicalModel;
use crate::domain::{Corpus, DomainError, MatchResult, QueryVector};

/// Scores incoming query vectors against the projected corpus.
///
/// The corpus projections are computed once at construction with the same
/// fitted model used for queries, then never change. Ranking is a pure read,
/// so concurrent callers need no coordination.
pub struct SimilarityRanker {
    corpus: Arc<Corpus>,
    vectors: Vec<QueryVector>,
}

impl SimilarityRanker {
    pub fn build(model: &dyn LexicalModel, corpus: Arc<Corpus>) -> Self {
        let vectors = corpus.queries().map(|query| model.embed(query)).collect();
        Self { corpus, vectors }
    }

    /// Index of the first corpus entry whose query equals the input after
    /// trimming and case folding. A hit here bypasses similarity scoring
    /// entirely.
    pub fn exact_match(&self, query: &str) -> Option<usize> {
        let needle = query.trim().to_lowercase();
        self.corpus
            .entries()
            .iter()
            .position(|entry| entry.query.to_lowercase() == needle)
    }

    /// Best cosine match for the query vector; ties break to the lowest entry
    /// index so repeated runs agree.
    pub fn rank(&self, query_vector: &QueryVector) -> Result<MatchResult, DomainError> {
        if self.vectors.len() != self.corpus.len() {
            return Err(DomainError::internal(format!(
                "corpus projection out of sync: {} vectors for {} entries",
                self.vectors.len(),
                self.corpus.len()
            )));
        }

        let mut best_index = 0usize;
        let mut best_score = f32::MIN;
        for (index, candidate) in self.vectors.iter().enumerate() {
            let score = cosine_similarity(query_vector, candidate);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }

        Ok(MatchResult::scored(best_index, best_score.max(0.0)))
    }
}

/// Cosine similarity of two sparse vectors, defined as 0 when either
/// magnitude is 0 so the all-zero query routes to the fallback path instead
/// of dividing by zero.
fn cosine_similarity(a: &QueryVector, b: &QueryVector) -> f32 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}
