//! Error type shared by every fallible engine operation.

use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Malformed token in document text, stop words or a query.
    #[error("invalid word: {0:?}")]
    InvalidWord(String),

    #[error("document id {0} is already indexed")]
    DuplicateId(DocId),

    #[error("document id {0} not found")]
    DocumentNotFound(DocId),

    #[error("document id {0} is negative")]
    InvalidId(DocId),

    #[error("unknown document status {0:?}")]
    InvalidStatus(String),

    /// Stop words are fixed once the first document has been added.
    #[error("stop words cannot change after documents have been added")]
    StopWordsAfterIngestion,
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub fn invalid_word<S: Into<String>>(word: S) -> Self {
        SearchError::InvalidWord(word.into())
    }
}
