use crate::domain::{Corpus, MatchResult};

/// User-facing reply when no corpus entry clears the confidence bar.
/// A static string, never derived from the corpus.
pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't find a relevant answer. Please try rephrasing your query or contact the pension office. Interesting Fact: Many users report issues with the DARPG portal loading, indicating a need for improved digital infrastructure.";

/// Decides between a corpus answer and the fixed fallback reply.
///
/// Exact matches are accepted unconditionally. Otherwise the similarity score
/// must be strictly greater than the threshold; a low-confidence match is a
/// terminal decision for that query, not an error.
pub struct MatchPolicy {
    threshold: f32,
}

impl MatchPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn decide(&self, result: &MatchResult, corpus: &Corpus) -> String {
        let accepted = result.is_exact || result.score > self.threshold;
        match corpus.get(result.entry_index) {
            Some(entry) if accepted => entry.answer.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}
