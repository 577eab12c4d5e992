//! Batch evaluation of independent queries against one populated server.
//!
//! Queries run in parallel on rayon's pool. Each slot of the output holds the
//! result of the query at the same position of the input; a malformed query
//! only fails its own slot.

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::info;

use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::filter::DocumentPredicate;
use crate::search_server::SearchServer;

/// Batch over [`DocumentStatus::Actual`] documents.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Vec<Result<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    process_queries_with(server, queries, &DocumentStatus::Actual)
}

/// Batch where every query is filtered by the same `predicate`.
pub fn process_queries_with<S, P>(
    server: &SearchServer,
    queries: &[S],
    predicate: &P,
) -> Vec<Result<Vec<Document>>>
where
    S: AsRef<str> + Sync,
    P: DocumentPredicate + ?Sized,
{
    let results: Vec<Result<Vec<Document>>> = queries
        .par_iter()
        .map(|query| server.find_top_documents_with(query.as_ref(), predicate))
        .collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(queries = queries.len(), failed, "processed query batch");
    results
}

/// Like [`process_queries`], but confined to the workers of `pool`.
pub fn process_queries_in<S>(
    pool: &ThreadPool,
    server: &SearchServer,
    queries: &[S],
) -> Vec<Result<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    pool.install(|| process_queries(server, queries))
}

/// All per-query hits concatenated in input order. Fails with the first
/// failing query's error.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    let mut joined = Vec::new();
    for hits in process_queries(server, queries) {
        joined.extend(hits?);
    }
    Ok(joined)
}
