use std::collections::BTreeSet;

use crate::error::Result;
use crate::tokenizer::{check_word, normalize, split_into_words, Tokenizer};

/// A parsed free-text query. Both sets are sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    /// Split `text` into plus words and `-`-prefixed minus words.
    ///
    /// Stop words are dropped from both sets. A word given both ways is kept
    /// only as a minus word.
    pub fn parse(text: &str, tokenizer: &Tokenizer) -> Result<Self> {
        let normalized = normalize(text);
        let mut query = Query::default();
        for word in split_into_words(&normalized) {
            check_word(word)?;
            let (is_minus, word) = match word.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, word),
            };
            if tokenizer.is_stop_word(word) {
                continue;
            }
            if is_minus {
                query.minus_words.insert(word.to_string());
            } else {
                query.plus_words.insert(word.to_string());
            }
        }
        query.plus_words.retain(|w| !query.minus_words.contains(w));
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty()
    }
}
