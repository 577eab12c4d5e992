use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, SearchError};

lazy_static! {
    static ref FORBIDDEN: Regex = Regex::new(r"[\x00-\x1F]").expect("valid regex");
}

/// NFKC-normalize and lowercase `text`.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Split already normalized text on whitespace.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Reject a bare `-`, a leading double minus and control characters.
pub fn check_word(word: &str) -> Result<()> {
    if word == "-" || word.starts_with("--") || FORBIDDEN.is_match(word) {
        tracing::trace!(word, "rejected token");
        return Err(SearchError::invalid_word(word));
    }
    Ok(())
}

/// Whitespace tokenizer with a fixed stop-word set.
///
/// The stop-word set is chosen when the tokenizer is built and never changes
/// afterwards; an index built with one tokenizer must be queried with the same.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from individual stop words. Empty strings are skipped.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words = HashSet::new();
        for word in words {
            let normalized = normalize(word.as_ref());
            for w in split_into_words(&normalized) {
                check_word(w)?;
                stop_words.insert(w.to_string());
            }
        }
        Ok(Self { stop_words })
    }

    /// Build from a whitespace separated list such as `"a an the"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::with_stop_words([text])
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }

    /// Tokenize document text into lowercase words, stop words removed.
    /// Order and repetitions are preserved.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let normalized = normalize(text);
        let mut tokens = Vec::new();
        for word in split_into_words(&normalized) {
            check_word(word)?;
            if self.is_stop_word(word) {
                continue;
            }
            tokens.push(word.to_string());
        }
        Ok(tokens)
    }
}
