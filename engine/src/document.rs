use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;
use crate::DocId;

/// Lifecycle tag carried by every document. `Removed` is only a tag; the
/// document stays in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, same spelling as the serialized form.
impl FromStr for DocumentStatus {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTUAL" => Ok(DocumentStatus::Actual),
            "IRRELEVANT" => Ok(DocumentStatus::Irrelevant),
            "BANNED" => Ok(DocumentStatus::Banned),
            "REMOVED" => Ok(DocumentStatus::Removed),
            _ => Err(SearchError::InvalidStatus(s.to_string())),
        }
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

/// Stored metadata of an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub id: DocId,
    pub status: DocumentStatus,
    pub rating: i32,
    pub word_count: usize,
}

/// Integer mean of `ratings`, truncated toward zero; 0 when empty.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_truncates_toward_zero() {
        assert_eq!(average_rating(&[1, 2, 3]), 2);
        assert_eq!(average_rating(&[0]), 0);
        assert_eq!(average_rating(&[1, 1, 1]), 1);
        assert_eq!(average_rating(&[1, 2]), 1);
        assert_eq!(average_rating(&[-1, -2]), -1);
        assert_eq!(average_rating(&[]), 0);
    }

    #[test]
    fn average_does_not_overflow() {
        assert_eq!(average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&DocumentStatus::Irrelevant).unwrap();
        assert_eq!(json, "\"IRRELEVANT\"");
        let back: DocumentStatus = serde_json::from_str("\"BANNED\"").unwrap();
        assert_eq!(back, DocumentStatus::Banned);
    }

    #[test]
    fn status_parses_from_cli_text() {
        assert_eq!("removed".parse::<DocumentStatus>(), Ok(DocumentStatus::Removed));
        assert_eq!(DocumentStatus::Irrelevant.to_string().parse::<DocumentStatus>(), Ok(DocumentStatus::Irrelevant));
        assert_eq!(
            "deleted".parse::<DocumentStatus>(),
            Err(SearchError::InvalidStatus("deleted".into()))
        );
    }
}
