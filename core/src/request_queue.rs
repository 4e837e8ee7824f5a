use std::collections::VecDeque;

use crate::config::MINUTES_IN_DAY;
use crate::document::{DocumentStatus, SearchHit};
use crate::error::{Result, SearchError};
use crate::server::SearchServer;
use crate::{DocId, Rating};

/// Sliding window over recent searches, counting the ones that found nothing.
///
/// Holds a shared borrow of the server, so the index cannot change while the
/// queue is alive.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    window: usize,
    no_results: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::with_capacity(MINUTES_IN_DAY), window: MINUTES_IN_DAY, no_results: 0 }
    }

    pub fn with_window(server: &'a SearchServer, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(SearchError::invalid_argument("request window must be positive"));
        }
        Ok(Self { server, requests: VecDeque::with_capacity(window), window, no_results: 0 })
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<SearchHit>> {
        let hits = self.server.find_top_documents(raw_query)?;
        self.record(!hits.is_empty());
        Ok(hits)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<SearchHit>> {
        let hits = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(!hits.is_empty());
        Ok(hits)
    }

    pub fn add_find_request_by<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<SearchHit>>
    where
        F: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let hits = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(!hits.is_empty());
        Ok(hits)
    }

    pub fn no_result_requests(&self) -> usize { self.no_results }

    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }

    fn record(&mut self, had_results: bool) {
        if self.requests.len() == self.window {
            if let Some(false) = self.requests.pop_front() {
                self.no_results -= 1;
            }
        }
        self.requests.push_back(had_results);
        if !had_results {
            self.no_results += 1;
        }
    }
}
