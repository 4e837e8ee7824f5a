use std::collections::HashSet;

use tracing::info;

use crate::server::SearchServer;
use crate::DocId;

/// Remove every document whose term set repeats that of an earlier-inserted
/// document. Returns the removed ids in removal order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let duplicates: Vec<DocId> = {
        let mut seen: HashSet<Vec<&str>> = HashSet::new();
        server.iter().filter(|&doc_id| !seen.insert(server.term_set(doc_id))).collect()
    };

    for &doc_id in &duplicates {
        info!(doc_id, "Found duplicate document id {doc_id}");
        server.remove_document(doc_id);
    }
    duplicates
}
