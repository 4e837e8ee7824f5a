use serde::Deserialize;

/// Upper bound on hits returned by a single search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevance values closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
/// Default request-tracker window: one request per minute over a day.
pub const MINUTES_IN_DAY: usize = 1440;

/// Ranking thresholds owned by a `SearchServer`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_relevance_epsilon")]
    pub relevance_epsilon: f64,
}

fn default_max_results() -> usize { MAX_RESULT_DOCUMENT_COUNT }
fn default_relevance_epsilon() -> f64 { RELEVANCE_EPSILON }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: default_max_results(), relevance_epsilon: default_relevance_epsilon() }
    }
}

impl SearchConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_relevance_epsilon(mut self, relevance_epsilon: f64) -> Self {
        self.relevance_epsilon = relevance_epsilon;
        self
    }
}
