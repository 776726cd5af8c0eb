//! Corpus ingestion: the CSV-backed store plus the built-in sample fallback.

pub mod csv_store;
pub mod sample;

pub use csv_store::CsvCorpusStore;
pub use sample::sample_corpus;
