use std::collections::{BTreeMap, HashMap};

use crate::DocId;

/// Word -> (document -> term frequency), plus the per-document reverse view.
///
/// Postings are written once per document and never recomputed. Callers must
/// not insert the same id twice; the document store guards that.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeMap<DocId, f64>>,
    doc_terms: BTreeMap<DocId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one document's tokens. TF of a word is its count divided by the
    /// token count; a document with no tokens is registered with no postings.
    pub fn insert(&mut self, doc_id: DocId, tokens: &[String]) {
        let mut terms: BTreeMap<String, f64> = BTreeMap::new();
        if !tokens.is_empty() {
            let inv_word_count = 1.0 / tokens.len() as f64;
            for token in tokens {
                *terms.entry(token.clone()).or_insert(0.0) += inv_word_count;
            }
        }
        for (term, tf) in terms.iter() {
            self.postings.entry(term.clone()).or_default().insert(doc_id, *tf);
        }
        self.doc_terms.insert(doc_id, terms);
    }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(word)
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.postings
            .get(word)
            .is_some_and(|docs| docs.contains_key(&doc_id))
    }

    pub fn doc_terms(&self, doc_id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.doc_terms.get(&doc_id)
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn num_docs(&self) -> usize {
        self.doc_terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn term_frequency_is_share_of_tokens() {
        let mut index = InvertedIndex::new();
        index.insert(1, &words("cat dog cat bird"));
        let cat = index.postings("cat").unwrap();
        assert!((cat[&1] - 0.5).abs() < 1e-12);
        assert!((index.postings("dog").unwrap()[&1] - 0.25).abs() < 1e-12);
        assert_eq!(index.num_terms(), 3);
    }

    #[test]
    fn both_views_stay_consistent() {
        let mut index = InvertedIndex::new();
        index.insert(1, &words("cat dog"));
        index.insert(2, &words("cat"));
        index.insert(3, &[]);
        assert_eq!(index.document_frequency("cat"), 2);
        assert_eq!(index.document_frequency("fish"), 0);
        assert!(index.contains("dog", 1));
        assert!(!index.contains("dog", 2));
        assert!(index.doc_terms(3).unwrap().is_empty());
        assert_eq!(index.num_docs(), 3);
        for (doc_id, terms) in [(1, index.doc_terms(1).unwrap()), (2, index.doc_terms(2).unwrap())] {
            for (term, tf) in terms {
                assert_eq!(index.postings(term).unwrap()[&doc_id], *tf);
            }
        }
    }
}
