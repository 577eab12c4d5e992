pub mod document;
pub mod error;
pub mod filter;
pub mod index;
pub mod process_queries;
pub mod query;
pub mod search_server;
pub mod store;
pub mod tokenizer;

pub use document::{Document, DocumentInfo, DocumentStatus};
pub use error::{Result, SearchError};
pub use filter::{AnyStatus, DocumentPredicate};
pub use index::InvertedIndex;
pub use process_queries::{process_queries, process_queries_in, process_queries_joined, process_queries_with};
pub use query::Query;
pub use search_server::{SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use store::DocumentStore;
pub use tokenizer::Tokenizer;

/// Caller-assigned document identifier. Signed so that negative ids can be
/// rejected with [`SearchError::InvalidId`] instead of wrapping.
pub type DocId = i32;
