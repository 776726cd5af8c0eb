use thiserror::Error;

/// Domain-level errors shared across application components.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The corpus could not be loaded; fatal to session construction.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The incoming query was empty or otherwise unusable. Recovered locally
    /// and surfaced as a plain user-facing message, never as a fault.
    #[error("validation error: {0}")]
    Validation(String),

    /// The conversational backend could not reach or parse the chat API.
    #[error("chat backend failure: {0}")]
    Chat(String),

    /// An internal invariant broke while answering a single query.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn chat(msg: impl Into<String>) -> Self {
        Self::Chat(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn dataset(kind: DatasetErrorKind, detail: impl Into<String>) -> Self {
        Self::Dataset(DatasetError::new(kind, detail))
    }
}

/// Failure loading or constructing the corpus.
#[derive(Debug, Error)]
#[error("{kind}: {detail}")]
pub struct DatasetError {
    pub kind: DatasetErrorKind,
    pub detail: String,
}

impl DatasetError {
    pub fn new(kind: DatasetErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Why the corpus failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetErrorKind {
    /// Zero usable entries remained after cleaning.
    Empty,
    /// The source file could not be read or parsed.
    Unreadable,
    /// The source is missing the `query` or `sample_response` column.
    MissingColumns,
}

impl std::fmt::Display for DatasetErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DatasetErrorKind::Empty => "empty",
            DatasetErrorKind::Unreadable => "unreadable",
            DatasetErrorKind::MissingColumns => "missing-columns",
        };
        f.write_str(label)
    }
}
