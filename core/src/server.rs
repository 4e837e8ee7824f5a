use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::iter::Copied;
use std::slice;

use tracing::debug;

use crate::config::SearchConfig;
use crate::document::{average_rating, DocMeta, DocumentStatus, SearchHit};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ranking::rank_hits;
use crate::tokenizer::{tokenize, StopWords};
use crate::{DocId, Rating};

/// Document ids in insertion order.
pub type DocIds<'a> = Copied<slice::Iter<'a, DocId>>;

/// The search engine: stop words, inverted index and document store.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    docs: HashMap<DocId, DocMeta>,
    order: Vec<DocId>,
    next_insertion: u64,
    config: SearchConfig,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { stop_words: StopWords::new(stop_words)?, ..Self::default() })
    }

    /// Build from a single space-delimited stop-word string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self { stop_words: StopWords::from_text(text)?, ..Self::default() })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn add_document(&mut self, doc_id: DocId, text: &str, status: DocumentStatus, ratings: &[Rating]) -> Result<()> {
        if doc_id < 0 || self.docs.contains_key(&doc_id) {
            return Err(SearchError::InvalidId(doc_id));
        }
        let words = tokenize(text, &self.stop_words)?;

        self.index.insert(doc_id, &words);
        let meta = DocMeta { rating: average_rating(ratings), status, insertion_index: self.next_insertion };
        self.next_insertion += 1;
        self.docs.insert(doc_id, meta);
        self.order.push(doc_id);
        debug!(doc_id, words = words.len(), rating = meta.rating, ?status, "document added");
        Ok(())
    }

    /// Top hits among `Actual` documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<SearchHit>> {
        self.find_top_documents_by(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Top hits among documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_by<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<SearchHit>>
    where
        F: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let hits = self.find_all_documents(&query, predicate);
        let total_hits = hits.len();
        let ranked = rank_hits(hits, &self.config);
        debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            total_hits,
            returned = ranked.len(),
            "query ranked"
        );
        Ok(ranked)
    }

    fn find_all_documents<F>(&self, query: &Query, predicate: F) -> Vec<SearchHit>
    where
        F: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let n = self.docs.len() as f64;
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for term in &query.plus_words {
            let Some(postings) = self.index.postings(term) else { continue };
            let idf = (n / postings.len() as f64).ln();
            for (&doc_id, &tf) in postings {
                let Some(meta) = self.docs.get(&doc_id) else { continue };
                if predicate(doc_id, meta.status, meta.rating) {
                    *scores.entry(doc_id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for term in &query.minus_words {
            let Some(postings) = self.index.postings(term) else { continue };
            for doc_id in postings.keys() {
                scores.remove(doc_id);
            }
        }

        scores
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.docs.get(&doc_id).map(|meta| SearchHit { doc_id, relevance, rating: meta.rating })
            })
            .collect()
    }

    /// Plus terms of `raw_query` present in the document, or nothing if any
    /// minus term is present.
    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let meta = self.docs.get(&doc_id).ok_or(SearchError::UnknownDocument(doc_id))?;

        if query.minus_words.iter().any(|term| self.index.contains(term, doc_id)) {
            return Ok((Vec::new(), meta.status));
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|term| self.index.contains(term, doc_id))
            .collect();
        Ok((matched, meta.status))
    }

    pub fn document_count(&self) -> usize { self.docs.len() }

    /// Id of the `n`-th document in insertion order.
    pub fn document_id(&self, n: usize) -> Result<DocId> {
        self.order.get(n).copied().ok_or_else(|| {
            SearchError::invalid_argument(format!("document index {n} out of range 0..{}", self.order.len()))
        })
    }

    pub fn document(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(&doc_id) }

    pub fn iter(&self) -> DocIds<'_> { self.order.iter().copied() }

    pub fn word_frequencies(&self, doc_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.index.word_frequencies(doc_id)
    }

    pub fn term_count(&self) -> usize { self.index.term_count() }

    /// Delete a document from every structure. Absent ids are a no-op;
    /// returns whether anything was removed.
    pub fn remove_document(&mut self, doc_id: DocId) -> bool {
        if self.docs.remove(&doc_id).is_none() {
            return false;
        }
        self.index.remove(doc_id);
        self.order.retain(|&id| id != doc_id);
        debug!(doc_id, remaining = self.docs.len(), "document removed");
        true
    }

    /// Documents inserted after `doc_id` whose term set equals its term set.
    pub fn find_duplicates(&self, doc_id: DocId) -> Result<BTreeSet<DocId>> {
        let meta = self.docs.get(&doc_id).ok_or(SearchError::UnknownDocument(doc_id))?;
        let terms = self.term_set(doc_id);
        Ok(self
            .iter()
            .filter(|other| {
                self.docs.get(other).is_some_and(|m| m.insertion_index > meta.insertion_index)
            })
            .filter(|&other| self.term_set(other) == terms)
            .collect())
    }

    pub(crate) fn term_set(&self, doc_id: DocId) -> Vec<&str> {
        self.index
            .word_frequencies(doc_id)
            .map(|freqs| freqs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Run each query against `Actual` documents, in input order.
    pub fn process_queries<S: AsRef<str>>(&self, queries: &[S]) -> Vec<Result<Vec<SearchHit>>> {
        queries.iter().map(|q| self.find_top_documents(q.as_ref())).collect()
    }

    /// Like `process_queries`, flattened; fails on the first malformed query.
    pub fn process_queries_joined<S: AsRef<str>>(&self, queries: &[S]) -> Result<Vec<SearchHit>> {
        let mut joined = Vec::new();
        for hits in self.process_queries(queries) {
            joined.extend(hits?);
        }
        Ok(joined)
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = DocIds<'a>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server
    }

    #[test]
    fn add_rejects_negative_and_duplicate_ids() {
        let mut server = server();
        assert_eq!(server.add_document(-1, "cat", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(-1)));
        assert_eq!(server.add_document(1, "cat", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(1)));
        assert_eq!(server.document_count(), 2);
    }

    #[test]
    fn failed_add_leaves_index_untouched() {
        let mut server = server();
        let terms = server.term_count();
        let err = server.add_document(3, "brand new wo\u{1}rd", DocumentStatus::Actual, &[1]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidTerm(_)));
        assert_eq!(server.document_count(), 2);
        assert_eq!(server.term_count(), terms);
        assert!(server.document(3).is_none());
    }

    #[test]
    fn stop_word_only_document_is_stored_without_postings() {
        let mut server = server();
        server.add_document(5, "and in at", DocumentStatus::Actual, &[4]).unwrap();
        assert_eq!(server.document_count(), 3);
        assert!(server.word_frequencies(5).unwrap().is_empty());
        assert_eq!(server.document(5).unwrap().rating, 4);
    }

    #[test]
    fn ranks_by_tf_idf() {
        let server = server();
        let hits = server.find_top_documents("curly tail").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, 1);
        // "curly" is in every document, so only "tail" carries weight.
        let expected = 0.25 * (2.0f64).ln();
        assert!((hits[0].relevance - expected).abs() < 1e-12);
        assert_eq!(hits[1].relevance, 0.0);
        assert_eq!(hits[0].rating, 5);
    }

    #[test]
    fn minus_term_removes_document() {
        let hits = server().find_top_documents("curly -dog").unwrap();
        assert_eq!(hits.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn unknown_terms_contribute_nothing() {
        assert!(server().find_top_documents("parrot -hamster").unwrap().is_empty());
    }

    #[test]
    fn predicate_filters_candidates() {
        let mut server = server();
        server.add_document(3, "curly parrot", DocumentStatus::Banned, &[9]).unwrap();
        let even = server.find_top_documents_by("curly", |id, _, _| id % 2 == 0).unwrap();
        assert_eq!(even.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![2]);
        let banned = server.find_top_documents_by_status("curly", DocumentStatus::Banned).unwrap();
        assert_eq!(banned.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![3]);
        let rated = server.find_top_documents_by("curly", |_, _, rating| rating > 4).unwrap();
        // Equal relevance: higher rating first.
        assert_eq!(rated.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn match_document_reports_plus_terms() {
        let server = server();
        let (words, status) = server.match_document("tail curly cat parrot", 1).unwrap();
        assert_eq!(words, vec!["cat", "curly", "tail"]);
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn match_document_minus_term_short_circuits() {
        let (words, _) = server().match_document("curly fancy -collar", 2).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn match_document_errors() {
        let server = server();
        assert_eq!(server.match_document("cat", 42), Err(SearchError::UnknownDocument(42)));
        assert_eq!(server.match_document("--cat", 1), Err(SearchError::InvalidQuery("--cat".into())));
    }

    #[test]
    fn document_id_follows_insertion_order() {
        let mut server = SearchServer::new(Vec::<String>::new()).unwrap();
        for id in [10, 3, 7] {
            server.add_document(id, "word", DocumentStatus::Actual, &[]).unwrap();
        }
        assert_eq!(server.document_id(0), Ok(10));
        assert_eq!(server.document_id(2), Ok(7));
        assert!(matches!(server.document_id(3), Err(SearchError::InvalidArgument(_))));
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![10, 3, 7]);

        server.remove_document(3);
        assert_eq!((&server).into_iter().collect::<Vec<_>>(), vec![10, 7]);
        assert_eq!(server.document_id(1), Ok(7));
    }

    #[test]
    fn remove_document_cleans_every_structure() {
        let mut server = server();
        assert!(server.remove_document(2));
        assert!(!server.remove_document(2));
        assert_eq!(server.document_count(), 1);
        assert!(server.word_frequencies(2).is_none());
        assert!(server.find_top_documents("dog").unwrap().is_empty());
        // curly, cat, tail
        assert_eq!(server.term_count(), 3);
    }

    #[test]
    fn find_duplicates_ignores_frequency_and_order() {
        let mut server = server();
        server.add_document(3, "tail cat curly", DocumentStatus::Irrelevant, &[]).unwrap();
        server.add_document(4, "curly cat", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.find_duplicates(1).unwrap().into_iter().collect::<Vec<_>>(), vec![3]);
        assert!(server.find_duplicates(3).unwrap().is_empty());
        assert_eq!(server.find_duplicates(9), Err(SearchError::UnknownDocument(9)));
    }

    #[test]
    fn process_queries_keeps_input_order() {
        let server = server();
        let results = server.process_queries(&["tail", "--bad", "collar"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].doc_id, 1);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap()[0].doc_id, 2);

        let joined = server.process_queries_joined(&["tail", "collar"]).unwrap();
        assert_eq!(joined.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(server.process_queries_joined(&["tail", "cat-"]).is_err());
    }

    #[test]
    fn config_overrides_result_limit() {
        let mut server = SearchServer::new(["and"]).unwrap().with_config(SearchConfig::default().with_max_results(1));
        server.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(2, "cat dog", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(3, "dog", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.find_top_documents("cat").unwrap().len(), 1);
    }
}
