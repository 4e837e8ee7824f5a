use std::cmp::Ordering;

use crate::config::SearchConfig;
use crate::document::SearchHit;

/// Order hits best first and truncate to `config.max_results`.
///
/// Hits are sorted by relevance, then split into runs whose relevance lies
/// within `relevance_epsilon` of the run's first hit. Each run is ordered by
/// rating (descending), with relevance and doc id as final tie-breakers, which
/// keeps the ordering total and deterministic.
pub fn rank_hits(mut hits: Vec<SearchHit>, config: &SearchConfig) -> Vec<SearchHit> {
    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.doc_id.cmp(&b.doc_id)));

    let mut start = 0;
    while start < hits.len() {
        let head = hits[start].relevance;
        let end = hits[start + 1..]
            .iter()
            .position(|h| (head - h.relevance).abs() >= config.relevance_epsilon)
            .map_or(hits.len(), |offset| start + 1 + offset);
        hits[start..end].sort_by(compare_within_run);
        start = end;
    }

    hits.truncate(config.max_results);
    hits
}

fn compare_within_run(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.rating
        .cmp(&a.rating)
        .then(b.relevance.total_cmp(&a.relevance))
        .then(a.doc_id.cmp(&b.doc_id))
}
