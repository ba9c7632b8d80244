pub mod chart;
pub mod contest;
pub mod stats;

pub use chart::{ChartData, ChartSeries, Charts, Metric, derive_chart, derive_charts};
pub use contest::{ContestRecord, UserDataset, parse_history};
pub use stats::{Stat, UserSummary, summarize_all};
