use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{split_words, validate_word, StopWords};

/// Parsed plus/minus query. Stop words appear in neither set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if !validate_word(data, is_minus) {
        return Err(SearchError::InvalidQuery(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

impl Query {
    /// Parse raw query text. Every word is validated before any is classified.
    pub fn parse(text: &str, stop_words: &StopWords) -> Result<Self> {
        let words = split_words(text)
            .into_iter()
            .map(parse_query_word)
            .collect::<Result<Vec<_>>>()?;

        let mut query = Query::default();
        for word in words {
            if stop_words.contains(word.data) { continue; }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        Ok(query)
    }
}
