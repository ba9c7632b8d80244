use serde::Serialize;
use std::fmt;

use crate::model::contest::{ContestRecord, UserDataset};

/// A summary value that may be missing for a reason worth showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Value(i64),
    NoData,
    InsufficientData,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Value(v) => write!(f, "{v}"),
            Stat::NoData => write!(f, "データなし"),
            Stat::InsufficientData => write!(f, "データ不足"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub contest_count: usize,
    pub max_rating: Stat,
    pub latest_rating: Stat,
    pub latest_change: Stat,
    /// Upstream answered with an empty history, which usually means a typo.
    pub invalid_username_hint: bool,
}

#[must_use]
pub fn max_rating(records: &[ContestRecord]) -> Stat {
    records
        .iter()
        .map(|r| r.new_rating)
        .max()
        .map_or(Stat::NoData, Stat::Value)
}

#[must_use]
pub fn latest_rating(records: &[ContestRecord]) -> Stat {
    records
        .last()
        .map_or(Stat::NoData, |r| Stat::Value(r.new_rating))
}

/// Difference between the last two records in arrival order.
#[must_use]
pub fn latest_change(records: &[ContestRecord]) -> Stat {
    match records {
        [.., previous, last] => Stat::Value(last.new_rating - previous.new_rating),
        _ => Stat::InsufficientData,
    }
}

#[must_use]
pub fn summarize(username: &str, records: &[ContestRecord]) -> UserSummary {
    UserSummary {
        username: username.to_string(),
        contest_count: records.len(),
        max_rating: max_rating(records),
        latest_rating: latest_rating(records),
        latest_change: latest_change(records),
        invalid_username_hint: records.is_empty(),
    }
}

#[must_use]
pub fn summarize_all(dataset: &UserDataset) -> Vec<UserSummary> {
    dataset
        .iter()
        .map(|(username, records)| summarize(username, records))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contest::test_support::record;

    #[test]
    fn empty_history() {
        let summary = summarize("ghost", &[]);
        assert_eq!(summary.contest_count, 0);
        assert_eq!(summary.max_rating, Stat::NoData);
        assert_eq!(summary.latest_rating, Stat::NoData);
        assert_eq!(summary.latest_change, Stat::InsufficientData);
        assert!(summary.invalid_username_hint);
    }

    #[test]
    fn one_record_has_no_change() {
        let records = vec![record("2023-01-01T22:40:00+09:00", true, 1200, 1500)];
        assert_eq!(latest_change(&records), Stat::InsufficientData);
        assert_eq!(latest_rating(&records), Stat::Value(1200));
        assert_eq!(max_rating(&records), Stat::Value(1200));
    }

    #[test]
    fn stats_follow_arrival_order_over_all_records() {
        let records = vec![
            record("2023-01-01T22:40:00+09:00", true, 1200, 1500),
            record("2023-06-01T22:40:00+09:00", true, 1600, 2000),
            record("2023-03-01T22:40:00+09:00", false, 1450, 1300),
        ];
        let summary = summarize("alice", &records);
        assert_eq!(summary.contest_count, 3);
        assert_eq!(summary.max_rating, Stat::Value(1600));
        assert_eq!(summary.latest_rating, Stat::Value(1450));
        assert_eq!(summary.latest_change, Stat::Value(-150));
        assert!(!summary.invalid_username_hint);
    }

    #[test]
    fn display_strings() {
        assert_eq!(Stat::Value(-3).to_string(), "-3");
        assert_eq!(Stat::NoData.to_string(), "データなし");
        assert_eq!(Stat::InsufficientData.to_string(), "データ不足");
    }
}
