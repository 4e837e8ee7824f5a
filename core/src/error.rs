//! Error kinds surfaced by the engine.
//!
//! Every variant is detected before any mutation of the index, so a failed
//! call leaves the engine exactly as it was.

use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Negative or already indexed document id.
    #[error("invalid document id: {0}")]
    InvalidId(DocId),

    /// Malformed word in a document or in the stop-word list.
    #[error("invalid term: {0:?}")]
    InvalidTerm(String),

    /// Query text with a malformed word.
    #[error("invalid query term: {0:?}")]
    InvalidQuery(String),

    #[error("unknown document id: {0}")]
    UnknownDocument(DocId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SearchError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
