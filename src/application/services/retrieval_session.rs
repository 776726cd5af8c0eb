use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::match_policy::{MatchPolicy, FALLBACK_MESSAGE};
use crate::domain::{Corpus, DomainError, MatchResult, QueryVector};
use crate::infrastructure::lexical::SimilarityRanker;

/// Reply for empty or otherwise unusable input. Surfaced as a plain message,
/// never as a fault.
pub const VALIDATION_MESSAGE: &str = "Please provide a valid query.";

/// Projection of arbitrary text into the corpus vector space. Fitted once
/// before session construction; implementations must be pure reads after
/// that.
pub trait LexicalModel: Send + Sync {
    fn embed(&self, text: &str) -> QueryVector;

    fn vocabulary_size(&self) -> usize;
}

/// Call shape shared by both chatbot backends so callers can swap them
/// transparently.
pub trait ChatBackend: Send + Sync {
    /// Answer one query. Never fails from the caller's point of view; the
    /// worst outcome is a fixed fallback string.
    fn answer(&self, query: &str) -> String;

    /// Precomputed starter questions; callers treat the slice as read-only.
    fn suggested_questions(&self) -> &[String];
}

/// Knobs applied at session construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Exclusive acceptance cutoff for similarity scores.
    pub threshold: f32,
    /// How many leading corpus queries to cache as suggestions.
    pub suggestion_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            suggestion_count: 10,
        }
    }
}

/// Façade over the retrieval pipeline: exact-match check, vectorization,
/// cosine ranking, and the acceptance policy.
///
/// All state (corpus, fitted model, corpus projections, cached suggestions)
/// is immutable after construction, so concurrent `answer` calls are safe
/// without locking. Construction is the only step that can fail, and it
/// happens before the session is exposed to callers.
pub struct RetrievalSession {
    corpus: Arc<Corpus>,
    model: Arc<dyn LexicalModel>,
    ranker: SimilarityRanker,
    policy: MatchPolicy,
    suggested: Vec<String>,
}

impl std::fmt::Debug for RetrievalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalSession")
            .field("corpus", &self.corpus)
            .field("suggested", &self.suggested)
            .finish_non_exhaustive()
    }
}

impl RetrievalSession {
    pub fn new(corpus: Corpus, model: Arc<dyn LexicalModel>, config: SessionConfig) -> Self {
        let corpus = Arc::new(corpus);
        let ranker = SimilarityRanker::build(model.as_ref(), Arc::clone(&corpus));
        let suggested = corpus
            .queries()
            .take(config.suggestion_count)
            .map(str::to_string)
            .collect::<Vec<_>>();

        debug!(
            target: "sahayak::retrieval",
            entries = corpus.len(),
            vocabulary = model.vocabulary_size(),
            suggestions = suggested.len(),
            "retrieval session ready"
        );

        Self {
            corpus,
            model,
            ranker,
            policy: MatchPolicy::new(config.threshold),
            suggested,
        }
    }

    /// Answer one query. Validation problems surface as a plain message and
    /// any internal fault is converted to the fallback reply at this
    /// boundary, so the call itself never fails.
    pub fn answer(&self, query: &str) -> String {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return VALIDATION_MESSAGE.to_string();
        }

        match self.answer_inner(trimmed) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    target: "sahayak::retrieval",
                    %err,
                    "answer pipeline failed; serving fallback"
                );
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    fn answer_inner(&self, query: &str) -> Result<String, DomainError> {
        let result = match self.ranker.exact_match(query) {
            Some(entry_index) => MatchResult::exact(entry_index),
            None => {
                let vector = self.model.embed(query);
                self.ranker.rank(&vector)?
            }
        };

        if let Some(entry) = self.corpus.get(result.entry_index) {
            debug!(
                target: "sahayak::retrieval",
                query,
                matched = %entry.query,
                score = result.score,
                exact = result.is_exact,
                "query ranked"
            );
        }

        Ok(self.policy.decide(&result, &self.corpus))
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.suggested
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }
}

impl ChatBackend for RetrievalSession {
    fn answer(&self, query: &str) -> String {
        RetrievalSession::answer(self, query)
    }

    fn suggested_questions(&self) -> &[String] {
        RetrievalSession::suggested_questions(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CorpusEntry;
    use crate::infrastructure::lexical::TfidfVectorizer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session(entries: &[(&str, &str)]) -> RetrievalSession {
        let entries = entries
            .iter()
            .filter_map(|(q, a)| CorpusEntry::new(*q, *a))
            .collect();
        let corpus = Corpus::new(entries).unwrap();
        let model = Arc::new(TfidfVectorizer::fit(&corpus));
        RetrievalSession::new(corpus, model, SessionConfig::default())
    }

    #[test]
    fn test_case_and_whitespace_variant_hits_exact_match() {
        let session = session(&[(
            "How do I update my bank details?",
            "Submit Form 14 to your disbursing authority.",
        )]);
        assert_eq!(
            session.answer("  how do I update my bank details?  "),
            "Submit Form 14 to your disbursing authority."
        );
    }

    #[test]
    fn test_exact_match_beats_similarity_tie_break() {
        // Both entries tokenize identically, so pure ranking would tie-break
        // to index 0; the exact textual match on index 1 must win instead.
        let session = session(&[
            ("delayed pension", "ranking winner"),
            ("pension delayed", "exact winner"),
        ]);
        assert_eq!(session.answer("pension delayed"), "exact winner");
    }

    #[test]
    fn test_garbage_query_returns_fallback() {
        let session = session(&[(
            "How do I update my bank details?",
            "Submit Form 14 to your disbursing authority.",
        )]);
        assert_eq!(session.answer("asdkjaslkdj random"), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_related_query_returns_stored_answer() {
        let session = session(&[
            ("Why is my pension payment delayed?", "Check your life certificate."),
            ("How do I update my bank details?", "Submit Form 14."),
        ]);
        assert_eq!(session.answer("my bank details need an update"), "Submit Form 14.");
    }

    #[test]
    fn test_empty_query_skips_the_vectorizer() {
        struct CountingModel {
            inner: TfidfVectorizer,
            embeds: AtomicUsize,
        }
        impl LexicalModel for CountingModel {
            fn embed(&self, text: &str) -> QueryVector {
                self.embeds.fetch_add(1, Ordering::SeqCst);
                self.inner.embed(text)
            }
            fn vocabulary_size(&self) -> usize {
                self.inner.vocabulary_size()
            }
        }

        let corpus = Corpus::new(vec![
            CorpusEntry::new("Why is my pension delayed?", "Check the portal.").unwrap(),
        ])
        .unwrap();
        let model = Arc::new(CountingModel {
            inner: TfidfVectorizer::fit(&corpus),
            embeds: AtomicUsize::new(0),
        });
        let session = RetrievalSession::new(corpus, Arc::clone(&model) as Arc<dyn LexicalModel>, SessionConfig::default());

        let after_build = model.embeds.load(Ordering::SeqCst);
        assert_eq!(session.answer(""), VALIDATION_MESSAGE);
        assert_eq!(session.answer("   \t  "), VALIDATION_MESSAGE);
        assert_eq!(model.embeds.load(Ordering::SeqCst), after_build);
    }

    #[test]
    fn test_suggested_questions_are_the_leading_corpus_queries() {
        let entries: Vec<(String, String)> = (0..15)
            .map(|i| (format!("Question number {i}?"), format!("Answer {i}.")))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(q, a)| (q.as_str(), a.as_str()))
            .collect();
        let session = session(&borrowed);

        let suggested = session.suggested_questions();
        assert_eq!(suggested.len(), 10);
        assert_eq!(suggested[0], "Question number 0?");
        assert_eq!(suggested[9], "Question number 9?");
        // Cached: repeated calls hand back the same slice.
        assert_eq!(
            session.suggested_questions().as_ptr(),
            suggested.as_ptr()
        );
    }

    #[test]
    fn test_small_corpus_yields_fewer_suggestions() {
        let session = session(&[("Only question?", "Only answer.")]);
        assert_eq!(session.suggested_questions().len(), 1);
    }

    #[test]
    fn test_session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RetrievalSession>();
    }

    #[test]
    fn test_concurrent_answers_agree() {
        let session = Arc::new(session(&[
            ("Why is my pension payment delayed?", "Check your life certificate."),
            ("How do I update my bank details?", "Submit Form 14."),
        ]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || session.answer("update my bank details"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Submit Form 14.");
        }
    }
}
