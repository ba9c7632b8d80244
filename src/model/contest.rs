use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One contest participation as returned by `/users/{name}/history/json`.
///
/// Every field except `InnerPerformance` and `Result` is required, so a
/// change in the upstream shape fails at deserialization instead of
/// surfacing later as a bogus chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContestRecord {
    pub is_rated: bool,
    pub place: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub performance: i64,
    #[serde(default)]
    pub inner_performance: Option<i64>,
    pub contest_screen_name: String,
    pub contest_name: String,
    pub contest_name_en: String,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub result: Option<String>,
}

impl ContestRecord {
    /// Calendar day the contest ended, in the offset the upstream reported.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_time.date_naive()
    }
}

/// Validate an upstream history body against the record shape.
///
/// # Errors
///
/// Will return `Err` if the body is not a JSON array of contest records
pub fn parse_history(body: &[u8]) -> Result<Vec<ContestRecord>, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// Contest history per username, kept in the order the names were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataset {
    entries: Vec<(String, Vec<ContestRecord>)>,
}

impl UserDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the history for `username`. A replaced user keeps
    /// its original position.
    pub fn insert(&mut self, username: String, records: Vec<ContestRecord>) {
        match self.entries.iter_mut().find(|(name, _)| *name == username) {
            Some((_, existing)) => *existing = records,
            None => self.entries.push((username, records)),
        }
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<&[ContestRecord]> {
        self.entries
            .iter()
            .find(|(name, _)| name == username)
            .map(|(_, records)| records.as_slice())
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContestRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(String, Vec<ContestRecord>)> for UserDataset {
    fn from_iter<T: IntoIterator<Item = (String, Vec<ContestRecord>)>>(iter: T) -> Self {
        let mut dataset = Self::new();
        for (username, records) in iter {
            dataset.insert(username, records);
        }
        dataset
    }
}
