use ahash::{AHashMap, AHashSet};

use crate::application::services::LexicalModel;
use crate::domain::{Corpus, QueryVector};

use super::stopwords::stop_word_set;

/// Tokens shorter than this carry no lexical signal and are dropped.
const MIN_TOKEN_CHARS: usize = 2;

/// Fixed vocabulary with per-term inverse-document-frequency weights, derived
/// deterministically from the corpus queries at fit time.
///
/// Dimension indices follow sorted lexical order of the vocabulary, so two
/// fits over the same corpus produce identical spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSpace {
    index: AHashMap<String, usize>,
    idf: Vec<f32>,
}

impl VectorSpace {
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Dimension index of a vocabulary term, if the term survived fitting.
    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn idf(&self, dimension: usize) -> Option<f32> {
        self.idf.get(dimension).copied()
    }
}

/// Term-frequency × inverse-document-frequency projection over the corpus
/// vocabulary.
///
/// Weighting: `tf(t, d) * idf(t)` with raw in-document term counts and the
/// smoothed form `idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1`. The smoothing
/// constant is fixed at 1 on both counts; cosine ranking downstream makes any
/// global scale irrelevant, only the relative weights matter.
pub struct TfidfVectorizer {
    space: VectorSpace,
}

impl TfidfVectorizer {
    /// Build the vector space from every corpus query.
    pub fn fit(corpus: &Corpus) -> Self {
        let n_docs = corpus.len();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for query in corpus.queries() {
            let unique: AHashSet<String> = tokenize(query).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = document_frequency.keys().cloned().collect();
        terms.sort_unstable();

        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency[term];
                ((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0
            })
            .collect();

        let index = terms
            .into_iter()
            .enumerate()
            .map(|(dimension, term)| (term, dimension))
            .collect();

        Self {
            space: VectorSpace { index, idf },
        }
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }
}

impl LexicalModel for TfidfVectorizer {
    /// Project text into the fitted space. Out-of-vocabulary tokens are
    /// silently ignored; a text with zero known tokens yields the all-zero
    /// vector.
    fn embed(&self, text: &str) -> QueryVector {
        let mut term_counts: AHashMap<usize, f32> = AHashMap::new();
        for token in tokenize(text) {
            if let Some(dimension) = self.space.dimension(&token) {
                *term_counts.entry(dimension).or_insert(0.0) += 1.0;
            }
        }

        let components = term_counts
            .into_iter()
            .map(|(dimension, count)| (dimension, count * self.space.idf[dimension]))
            .collect();

        QueryVector::new(components)
    }

    fn vocabulary_size(&self) -> usize {
        self.space.len()
    }
}

/// Lowercased alphanumeric word tokens with stop words removed. The same rule
/// runs at fit time and at embed time.
fn tokenize(text: &str) -> Vec<String> {
    let stop = stop_word_set();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !stop.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CorpusEntry;

    fn corpus(queries: &[&str]) -> Corpus {
        let entries = queries
            .iter()
            .map(|q| CorpusEntry::new(*q, "answer").unwrap())
            .collect();
        Corpus::new(entries).unwrap()
    }

    #[test]
    fn test_tokenize_lowercases_and_strips_stop_words() {
        let tokens = tokenize("How do I UPDATE my bank-details?");
        assert_eq!(tokens, vec!["update", "bank", "details"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = tokenize("I a x pension");
        assert_eq!(tokens, vec!["pension"]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = corpus(&[
            "Why is my pension payment delayed?",
            "How do I update my bank details?",
            "How can I check my pension status online?",
        ]);
        let first = TfidfVectorizer::fit(&corpus);
        let second = TfidfVectorizer::fit(&corpus);
        assert_eq!(first.space(), second.space());
    }

    #[test]
    fn test_dimensions_follow_sorted_lexical_order() {
        let corpus = corpus(&["zebra pension", "apple pension"]);
        let model = TfidfVectorizer::fit(&corpus);
        let space = model.space();
        assert_eq!(space.dimension("apple"), Some(0));
        assert_eq!(space.dimension("pension"), Some(1));
        assert_eq!(space.dimension("zebra"), Some(2));
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_terms() {
        let corpus = corpus(&[
            "pension payment delayed",
            "pension portal offline",
            "bank details update",
        ]);
        let model = TfidfVectorizer::fit(&corpus);
        let space = model.space();
        let pension_idf = space.idf(space.dimension("pension").unwrap()).unwrap();
        let bank_idf = space.idf(space.dimension("bank").unwrap()).unwrap();
        assert!(bank_idf > pension_idf);
    }

    #[test]
    fn test_embed_ignores_out_of_vocabulary_tokens() {
        let corpus = corpus(&["pension payment delayed"]);
        let model = TfidfVectorizer::fit(&corpus);

        let known = model.embed("pension payment");
        let mixed = model.embed("pension payment xylophone quasar");
        assert_eq!(known, mixed);
        assert_eq!(model.vocabulary_size(), 3);
    }

    #[test]
    fn test_embed_unknown_text_yields_zero_vector() {
        let corpus = corpus(&["pension payment delayed"]);
        let model = TfidfVectorizer::fit(&corpus);
        assert!(model.embed("asdkjaslkdj random").is_zero());
        assert!(model.embed("the of and").is_zero());
    }

    #[test]
    fn test_embed_counts_repeated_terms() {
        let corpus = corpus(&["pension pension delayed", "bank details"]);
        let model = TfidfVectorizer::fit(&corpus);
        let space = model.space();
        let dim = space.dimension("pension").unwrap();

        let once = model.embed("pension");
        let twice = model.embed("pension pension");
        let weight_once = once
            .components()
            .iter()
            .find(|&&(d, _)| d == dim)
            .map(|&(_, w)| w)
            .unwrap();
        let weight_twice = twice
            .components()
            .iter()
            .find(|&&(d, _)| d == dim)
            .map(|&(_, w)| w)
            .unwrap();
        assert!((weight_twice - 2.0 * weight_once).abs() < 1e-6);
    }
}
