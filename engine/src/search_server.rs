use std::collections::BTreeMap;

use tracing::debug;

use crate::document::{average_rating, Document, DocumentInfo, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::filter::DocumentPredicate;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::store::DocumentStore;
use crate::tokenizer::Tokenizer;
use crate::DocId;

/// Upper bound on the number of hits returned by one query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// In-memory TF-IDF search over rated, status-tagged documents.
///
/// Ingestion takes `&mut self` and is single-writer. Every query method takes
/// `&self` and never mutates, so a populated server can be shared across
/// threads for querying.
#[derive(Debug, Default)]
pub struct SearchServer {
    tokenizer: Tokenizer,
    store: DocumentStore,
    index: InvertedIndex,
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server whose stop words are the whitespace separated words of `text`.
    pub fn with_stop_words(text: &str) -> Result<Self> {
        Ok(Self { tokenizer: Tokenizer::from_text(text)?, ..Self::default() })
    }

    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { tokenizer: Tokenizer::with_stop_words(words)?, ..Self::default() })
    }

    /// Replace the stop words. Only allowed while the server is empty.
    pub fn set_stop_words(&mut self, text: &str) -> Result<()> {
        if !self.store.is_empty() {
            return Err(SearchError::StopWordsAfterIngestion);
        }
        self.tokenizer = Tokenizer::from_text(text)?;
        Ok(())
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Tokenize and index one document.
    ///
    /// On error nothing is written, so the server keeps its previous state.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.store.check_new_id(id)?;
        let tokens = self.tokenizer.tokenize(text)?;
        let rating = average_rating(ratings);
        self.index.insert(id, &tokens);
        self.store.insert(id, status, rating, tokens.len());
        debug!(id, word_count = tokens.len(), rating, ?status, "indexed document");
        Ok(())
    }

    /// Top hits among [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(query, &DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(query, &status)
    }

    /// Top hits among documents accepted by `predicate`, at most
    /// [`MAX_RESULT_DOCUMENT_COUNT`], best first.
    pub fn find_top_documents_with<P>(&self, query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let parsed = Query::parse(query, &self.tokenizer)?;
        let mut hits = self.find_all_documents(&parsed, predicate);
        let total_hits = hits.len();
        sort_by_relevance(&mut hits);
        hits.truncate(MAX_RESULT_DOCUMENT_COUNT);
        debug!(
            plus = parsed.plus_words.len(),
            minus = parsed.minus_words.len(),
            total_hits,
            "evaluated query"
        );
        Ok(hits)
    }

    /// Plus words of `query` found in document `id`, sorted, with its status.
    /// The word list is empty when the document contains any minus word.
    pub fn match_document(&self, query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.store.get(id)?.status;
        let parsed = Query::parse(query, &self.tokenizer)?;
        if parsed.minus_words.iter().any(|w| self.index.contains(w, id)) {
            return Ok((Vec::new(), status));
        }
        let matched = parsed
            .plus_words
            .into_iter()
            .filter(|w| self.index.contains(w, id))
            .collect();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// Indexed ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.store.ids()
    }

    pub fn document(&self, id: DocId) -> Result<DocumentInfo> {
        self.store.get(id).copied()
    }

    /// Word -> term frequency for document `id`.
    pub fn word_frequencies(&self, id: DocId) -> Result<&BTreeMap<String, f64>> {
        self.store.get(id)?;
        self.index.doc_terms(id).ok_or(SearchError::DocumentNotFound(id))
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: &P) -> Vec<Document>
    where
        P: DocumentPredicate + ?Sized,
    {
        let total = self.store.len() as f64;
        let mut scores: BTreeMap<DocId, (f64, i32)> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = (total / postings.len() as f64).ln();
            for (&id, &tf) in postings {
                let Ok(info) = self.store.get(id) else {
                    continue;
                };
                if predicate.matches(id, info.status, info.rating) {
                    scores.entry(id).or_insert((0.0, info.rating)).0 += tf * idf;
                }
            }
        }
        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    scores.remove(id);
                }
            }
        }
        scores
            .into_iter()
            .map(|(id, (relevance, rating))| Document::new(id, relevance, rating))
            .collect()
    }
}

/// Descending relevance; each group of hits within [`RELEVANCE_EPSILON`] of
/// the group's most relevant hit is reordered by descending rating, then
/// ascending id.
fn sort_by_relevance(hits: &mut [Document]) {
    hits.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.rating.cmp(&a.rating))
            .then_with(|| a.id.cmp(&b.id))
    });
    let mut start = 0;
    while start < hits.len() {
        let mut end = start + 1;
        while end < hits.len()
            && (hits[start].relevance - hits[end].relevance).abs() < RELEVANCE_EPSILON
        {
            end += 1;
        }
        hits[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_ties_fall_back_to_rating() {
        let mut hits = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.5 + 1e-8, 0),
            Document::new(3, 0.5 - 1e-8, 9),
            Document::new(4, 0.9, -5),
        ];
        sort_by_relevance(&mut hits);
        let ids: Vec<DocId> = hits.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![4, 3, 1, 2]);
    }

    #[test]
    fn tie_groups_do_not_chain_past_epsilon() {
        let mut hits = vec![
            Document::new(3, 0.0, 9),
            Document::new(1, 1.8e-6, 0),
            Document::new(2, 0.9e-6, 5),
        ];
        sort_by_relevance(&mut hits);
        let ids: Vec<DocId> = hits.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn equal_relevance_and_rating_orders_by_id() {
        let mut hits = vec![Document::new(9, 0.0, 1), Document::new(2, 0.0, 1)];
        sort_by_relevance(&mut hits);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn failed_add_leaves_server_unchanged() {
        let mut server = SearchServer::new();
        server.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        assert_eq!(
            server.add_document(2, "dog --bad", DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidWord("--bad".into()))
        );
        assert_eq!(server.add_document(1, "dog", DocumentStatus::Actual, &[]), Err(SearchError::DuplicateId(1)));
        assert_eq!(server.add_document(-4, "dog", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(-4)));
        assert_eq!(server.document_count(), 1);
        assert!(server.find_top_documents("dog").unwrap().is_empty());
        assert_eq!(server.document(2), Err(SearchError::DocumentNotFound(2)));
    }

    #[test]
    fn stop_words_lock_after_first_document() {
        let mut server = SearchServer::new();
        server.set_stop_words("in the").unwrap();
        server.add_document(0, "cat in the city", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.set_stop_words("cat"), Err(SearchError::StopWordsAfterIngestion));
        assert!(server.tokenizer().is_stop_word("in"));
    }
}
