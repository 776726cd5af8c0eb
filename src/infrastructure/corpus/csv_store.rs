use std::path::{Path, PathBuf};

use crate::domain::{Corpus, CorpusEntry, DatasetErrorKind, DomainError};

/// Loads the grievance corpus from a comma-separated dataset file.
///
/// The file must carry a `query` column and a `sample_response` column (a
/// literal `answer` header is accepted as the already-normalized name). Rows
/// with a missing or whitespace-only field are dropped; everything that
/// survives keeps its source order.
pub struct CsvCorpusStore {
    path: PathBuf,
}

impl CsvCorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and clean the dataset. Fails with a dataset error when the file
    /// cannot be parsed, lacks the required columns, or cleans down to zero
    /// entries. No side effects beyond reading the file.
    pub fn load(&self) -> Result<Corpus, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|err| {
                DomainError::dataset(
                    DatasetErrorKind::Unreadable,
                    format!("failed to open {:?}: {err}", self.path),
                )
            })?;

        let headers = reader.headers().map_err(|err| {
            DomainError::dataset(
                DatasetErrorKind::Unreadable,
                format!("failed to read header row: {err}"),
            )
        })?;

        let query_column = find_column(headers, &["query"]);
        let answer_column = find_column(headers, &["sample_response", "answer"]);
        let (query_column, answer_column) = match (query_column, answer_column) {
            (Some(q), Some(a)) => (q, a),
            _ => {
                return Err(DomainError::dataset(
                    DatasetErrorKind::MissingColumns,
                    format!(
                        "expected `query` and `sample_response` columns, found {:?}",
                        headers.iter().collect::<Vec<_>>()
                    ),
                ));
            }
        };

        let mut entries = Vec::new();
        let mut dropped = 0usize;
        for record in reader.records() {
            let record = record.map_err(|err| {
                DomainError::dataset(
                    DatasetErrorKind::Unreadable,
                    format!("failed to parse record: {err}"),
                )
            })?;

            let query = record.get(query_column).unwrap_or_default();
            let answer = record.get(answer_column).unwrap_or_default();
            match CorpusEntry::new(query, answer) {
                Some(entry) => entries.push(entry),
                None => dropped += 1,
            }
        }

        tracing::debug!(
            target: "sahayak::corpus",
            path = ?self.path,
            loaded = entries.len(),
            dropped,
            "corpus dataset read"
        );

        Corpus::new(entries)
    }
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        names
            .iter()
            .any(|name| header.trim().eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetErrorKind;
    use std::fs;

    fn write_dataset(content: &str) -> (tempfile::TempDir, CsvCorpusStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        fs::write(&path, content).unwrap();
        let store = CsvCorpusStore::new(&path);
        (dir, store)
    }

    fn dataset_kind(err: DomainError) -> DatasetErrorKind {
        match err {
            DomainError::Dataset(dataset) => dataset.kind,
            other => panic!("expected dataset error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_preserves_source_order() {
        let (_dir, store) = write_dataset(
            "query,sample_response\n\
             Why is my pension delayed?,Check your life certificate.\n\
             How do I update bank details?,Submit Form 14.\n",
        );
        let corpus = store.load().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.entries()[0].query, "Why is my pension delayed?");
        assert_eq!(corpus.entries()[1].answer, "Submit Form 14.");
    }

    #[test]
    fn test_load_accepts_extra_columns_in_any_order() {
        let (_dir, store) = write_dataset(
            "category,Sample_Response,query\n\
             payments,Check the portal.,Where is my pension?\n",
        );
        let corpus = store.load().unwrap();
        assert_eq!(corpus.entries()[0].query, "Where is my pension?");
        assert_eq!(corpus.entries()[0].answer, "Check the portal.");
    }

    #[test]
    fn test_load_accepts_normalized_answer_header() {
        let (_dir, store) = write_dataset(
            "query,answer\nWhere is my pension?,Check the portal.\n",
        );
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_load_drops_rows_with_blank_fields() {
        let (_dir, store) = write_dataset(
            "query,sample_response\n\
             ,No question here.\n\
             Whitespace only?,   \n\
             Valid question?,Valid answer.\n\
             Short row without answer\n",
        );
        let corpus = store.load().unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.entries()[0].query, "Valid question?");
    }

    #[test]
    fn test_missing_answer_column_fails() {
        let (_dir, store) = write_dataset("query,category\nWhere is my pension?,payments\n");
        assert_eq!(
            dataset_kind(store.load().unwrap_err()),
            DatasetErrorKind::MissingColumns
        );
    }

    #[test]
    fn test_missing_query_column_fails() {
        let (_dir, store) = write_dataset("id,sample_response\n1,Check the portal.\n");
        assert_eq!(
            dataset_kind(store.load().unwrap_err()),
            DatasetErrorKind::MissingColumns
        );
    }

    #[test]
    fn test_unreadable_path_fails() {
        let store = CsvCorpusStore::new("/definitely/not/here.csv");
        assert_eq!(
            dataset_kind(store.load().unwrap_err()),
            DatasetErrorKind::Unreadable
        );
    }

    #[test]
    fn test_all_rows_dropped_fails_as_empty() {
        let (_dir, store) = write_dataset("query,sample_response\n ,\n,  \n");
        assert_eq!(
            dataset_kind(store.load().unwrap_err()),
            DatasetErrorKind::Empty
        );
    }
}
