use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

/// Split text on ASCII spaces, collapsing runs of spaces.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

fn has_control_chars(word: &str) -> bool {
    word.bytes().any(|b| b < 0x20)
}

/// Word check shared by documents, stop words and queries.
///
/// In exclusion context `word` is the term with its `-` marker already
/// stripped, so a leading hyphen here means the raw query had `--term`.
pub fn validate_word(word: &str, exclusion: bool) -> bool {
    if word.is_empty() || has_control_chars(word) || word.ends_with('-') {
        return false;
    }
    !(exclusion && word.starts_with('-'))
}

/// Fixed set of terms excluded from indexing and from query matching.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from a collection of words. Empty strings are skipped and
    /// duplicates collapse; any malformed word fails the whole set.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if !validate_word(word, false) {
                return Err(SearchError::InvalidTerm(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Split document text into indexed words: validates every word, then drops
/// stop words. Validation covers the whole text before anything is returned.
pub fn tokenize<'a>(text: &'a str, stop_words: &StopWords) -> Result<Vec<&'a str>> {
    let words = split_words(text);
    if let Some(bad) = words.iter().find(|w| !validate_word(w, false)) {
        return Err(SearchError::InvalidTerm(bad.to_string()));
    }
    Ok(words.into_iter().filter(|w| !stop_words.contains(w)).collect())
}
