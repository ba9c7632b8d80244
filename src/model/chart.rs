use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::model::contest::{ContestRecord, UserDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Rating,
    Performance,
}

impl Metric {
    #[must_use]
    pub fn value(self, record: &ContestRecord) -> i64 {
        match self {
            Metric::Rating => record.new_rating,
            Metric::Performance => record.performance,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Metric::Rating => "レート推移",
            Metric::Performance => "パフォーマンス推移",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Metric::Rating => "rating",
            Metric::Performance => "performance",
        }
    }
}

/// One line on a chart. `data` is aligned to the chart's labels; `None` is a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<Option<i64>>,
}

/// Shaped the way Chart.js expects its `data` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charts {
    pub rating: ChartData,
    pub performance: ChartData,
}

/// Rated entries only, oldest first.
#[must_use]
pub fn rated_history(records: &[ContestRecord]) -> Vec<&ContestRecord> {
    let mut rated: Vec<&ContestRecord> = records.iter().filter(|r| r.is_rated).collect();
    rated.sort_by_key(|r| r.end_time);
    rated
}

/// Every day on which any user finished a rated contest, oldest first.
#[must_use]
pub fn label_axis(dataset: &UserDataset) -> Vec<NaiveDate> {
    dataset
        .iter()
        .flat_map(|(_, records)| records.iter().filter(|r| r.is_rated))
        .map(ContestRecord::end_date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `M/D/YYYY`, no zero padding.
#[must_use]
pub fn format_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Looks up each axis date in `rated`; the first contest of a day wins.
#[must_use]
pub fn align_series(rated: &[&ContestRecord], axis: &[NaiveDate], metric: Metric) -> Vec<Option<i64>> {
    let mut by_date: HashMap<NaiveDate, i64> = HashMap::new();
    for record in rated {
        by_date
            .entry(record.end_date())
            .or_insert_with(|| metric.value(record));
    }

    axis.iter().map(|date| by_date.get(date).copied()).collect()
}

fn chart_for_axis(dataset: &UserDataset, axis: &[NaiveDate], metric: Metric) -> ChartData {
    let datasets = dataset
        .iter()
        .map(|(username, records)| ChartSeries {
            label: username.to_string(),
            data: align_series(&rated_history(records), axis, metric),
        })
        .collect();

    ChartData {
        labels: axis.iter().copied().map(format_label).collect(),
        datasets,
    }
}

#[must_use]
pub fn derive_chart(dataset: &UserDataset, metric: Metric) -> ChartData {
    chart_for_axis(dataset, &label_axis(dataset), metric)
}

/// Rating and performance charts over one shared label axis.
#[must_use]
pub fn derive_charts(dataset: &UserDataset) -> Charts {
    let axis = label_axis(dataset);
    Charts {
        rating: chart_for_axis(dataset, &axis, Metric::Rating),
        performance: chart_for_axis(dataset, &axis, Metric::Performance),
    }
}
