use serde::{Deserialize, Serialize};

use crate::{DocId, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Stored per-document metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocMeta {
    pub rating: Rating,
    pub status: DocumentStatus,
    /// Monotonic insertion counter, the duplicate tie-break key.
    pub insertion_index: u64,
}

/// One ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub relevance: f64,
    pub rating: Rating,
}

/// Truncated mean of the ratings, 0 for an empty list.
pub fn average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() { return 0; }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as Rating
}
