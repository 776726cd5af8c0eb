use serde::{Deserialize, Serialize};

use crate::domain::errors::{DatasetErrorKind, DomainError};

/// One known (question, answer) pair from the grievance dataset.
///
/// Entries are immutable once loaded. Both fields are trimmed at construction
/// and an entry with an empty field is rejected, so a stored entry always
/// carries usable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub query: String,
    pub answer: String,
}

impl CorpusEntry {
    /// Build an entry from raw dataset fields, returning `None` when either
    /// field is empty after trimming.
    pub fn new(query: impl AsRef<str>, answer: impl AsRef<str>) -> Option<Self> {
        let query = query.as_ref().trim();
        let answer = answer.as_ref().trim();
        if query.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Ordered, read-only collection of corpus entries.
///
/// Insertion order equals source order and is load-bearing: entry indices in
/// [`MatchResult`] refer to positions in this sequence, and ties in similarity
/// break toward the lowest index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Wrap cleaned entries, rejecting an empty collection.
    pub fn new(entries: Vec<CorpusEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::dataset(
                DatasetErrorKind::Empty,
                "corpus has no usable entries after cleaning",
            ));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false by construction; present for slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.query.as_str())
    }
}

/// Sparse projection of a text into a fitted vector space.
///
/// Components are `(dimension index, weight)` pairs kept sorted by index so
/// dot products run as a single merge walk. Zero weights are dropped, which
/// makes "no known tokens" and "all-zero vector" the same representation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    components: Vec<(usize, f32)>,
}

impl QueryVector {
    pub fn new(mut components: Vec<(usize, f32)>) -> Self {
        components.retain(|&(_, weight)| weight != 0.0);
        components.sort_unstable_by_key(|&(index, _)| index);
        Self { components }
    }

    pub fn zero() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[(usize, f32)] {
        &self.components
    }

    /// Dot product over the shared dimensions of two sorted sparse vectors.
    pub fn dot(&self, other: &Self) -> f32 {
        let mut sum = 0.0f32;
        let mut left = self.components.iter().peekable();
        let mut right = other.components.iter().peekable();

        while let (Some(&&(li, lw)), Some(&&(ri, rw))) = (left.peek(), right.peek()) {
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += lw * rw;
                    left.next();
                    right.next();
                }
            }
        }

        sum
    }

    pub fn norm(&self) -> f32 {
        self.components
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f32>()
            .sqrt()
    }
}

/// Outcome of ranking one query against the corpus.
///
/// `score` is a cosine similarity in [0, 1]. For an exact textual match the
/// ranking is skipped entirely and the score is reported as 1.0 without being
/// computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub entry_index: usize,
    pub score: f32,
    pub is_exact: bool,
}

impl MatchResult {
    pub fn exact(entry_index: usize) -> Self {
        Self {
            entry_index,
            score: 1.0,
            is_exact: true,
        }
    }

    pub fn scored(entry_index: usize, score: f32) -> Self {
        Self {
            entry_index,
            score,
            is_exact: false,
        }
    }
}

/// One transcript turn exchanged with the conversational backend.
#[cfg(feature = "llm-backend")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[cfg(feature = "llm-backend")]
impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Speaker tag in the wire shape chat-completion APIs expect.
#[cfg(feature = "llm-backend")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}
