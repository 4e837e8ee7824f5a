//! In-memory full-text search over short documents.
//!
//! Documents are indexed into an inverted index of per-document term
//! frequencies and ranked by TF-IDF against plus/minus queries. The engine also
//! carries per-document metadata (rating, status) for predicate filtering,
//! duplicate detection, a sliding-window request tracker and a paginator.

pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub type DocId = i32;
pub type Rating = i32;

pub use config::{SearchConfig, MAX_RESULT_DOCUMENT_COUNT, MINUTES_IN_DAY, RELEVANCE_EPSILON};
pub use dedup::remove_duplicates;
pub use document::{DocMeta, DocumentStatus, SearchHit};
pub use error::{Result, SearchError};
pub use paginator::{paginate, Paginator};
pub use request_queue::RequestQueue;
pub use server::SearchServer;
