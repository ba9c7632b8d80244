use maud::{Markup, html};

use crate::model::{ChartData, Metric};

/// A canvas that `static/charts.js` turns into a Chart.js line chart.
/// The chart's `data` option travels in `data-chart`.
#[must_use]
pub fn render_chart(id: &str, chart: &ChartData, metric: Metric) -> Markup {
    let payload = serde_json::to_string(chart).unwrap_or_else(|_| "{}".to_string());

    html! {
        section class="chart-card" data-metric=(metric.key()) {
            h2 { (metric.title()) }
            @if chart.labels.is_empty() {
                p class="chart-empty" { "レーティング対象のコンテストがありません" }
            } @else {
                canvas id=(id) class="line-chart" data-chart=(payload) {}
            }
        }
    }
}
