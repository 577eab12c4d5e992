//! Document filters applied after relevance scoring.
//!
//! A [`DocumentPredicate`] sees a candidate's id, status and rating and
//! decides whether it may appear in the results. Filtering by one status
//! (`DocumentStatus` itself implements the trait) is the common case,
//! [`AnyStatus`] accepts everything, and any
//! `Fn(DocId, DocumentStatus, i32) -> bool` closure can be used directly.

use crate::document::DocumentStatus;
use crate::DocId;

pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl DocumentPredicate for DocumentStatus {
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        *self == status
    }
}

/// Accepts every document regardless of status.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyStatus;

impl DocumentPredicate for AnyStatus {
    fn matches(&self, _id: DocId, _status: DocumentStatus, _rating: i32) -> bool {
        true
    }
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicate_compares_equality() {
        assert!(DocumentStatus::Banned.matches(1, DocumentStatus::Banned, 0));
        assert!(!DocumentStatus::Banned.matches(1, DocumentStatus::Actual, 0));
    }

    #[test]
    fn closures_and_any_status() {
        let even = |id: DocId, _: DocumentStatus, _: i32| id % 2 == 0;
        assert!(even.matches(4, DocumentStatus::Removed, -3));
        assert!(!even.matches(3, DocumentStatus::Actual, 5));
        assert!(AnyStatus.matches(3, DocumentStatus::Removed, 0));
    }
}
