use std::collections::{BTreeMap, HashMap};

use crate::DocId;

/// Posting list for one term: doc id -> term frequency in that document.
pub type Postings = BTreeMap<DocId, f64>;

/// Term -> postings, plus the reverse doc -> term frequencies view used for
/// removal and duplicate detection. Both views always describe the same pairs.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Postings>,
    doc_terms: HashMap<DocId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index already validated, stop-word-free words of a new document.
    /// An empty word list registers the document with no postings.
    pub fn insert(&mut self, doc_id: DocId, words: &[&str]) {
        let freqs = self.doc_terms.entry(doc_id).or_default();
        if words.is_empty() { return; }
        let inv_len = 1.0 / words.len() as f64;
        for word in words {
            *freqs.entry((*word).to_string()).or_insert(0.0) += inv_len;
        }
        for (term, tf) in freqs.iter() {
            self.postings.entry(term.clone()).or_default().insert(doc_id, *tf);
        }
    }

    /// Strip every posting of `doc_id`, dropping terms left without postings.
    /// Returns false if the document was not indexed.
    pub fn remove(&mut self, doc_id: DocId) -> bool {
        let Some(freqs) = self.doc_terms.remove(&doc_id) else { return false };
        for term in freqs.keys() {
            let is_empty = match self.postings.get_mut(term) {
                Some(docs) => {
                    docs.remove(&doc_id);
                    docs.is_empty()
                }
                None => false,
            };
            if is_empty {
                self.postings.remove(term);
            }
        }
        true
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.postings.get(term) }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|docs| docs.contains_key(&doc_id))
    }

    pub fn word_frequencies(&self, doc_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.doc_terms.get(&doc_id)
    }

    pub fn term_count(&self) -> usize { self.postings.len() }
}
