pub mod chart;
pub mod summary;

use maud::{Markup, html};

use crate::model::{Metric, derive_charts, summarize_all};
use crate::mvu::dashboard::{DashboardModel, TOO_MANY_USERNAMES_ERROR};
use chart::render_chart;
use summary::render_summary_table;

/// Username inputs plus the fetch button.
///
/// Typing in the last input re-renders the form through `dashboard/form` so
/// the trailing blank slot appears; the button swaps the whole dashboard.
#[must_use]
pub fn render_username_form(model: &DashboardModel) -> Markup {
    let last = model.usernames.len().saturating_sub(1);
    html! {
        form id="user-form" action="." method="get"
            hx-get="dashboard" hx-target="#dashboard" hx-indicator="#loading" {
            div class="username-inputs" {
                @for (idx, username) in model.usernames.iter().enumerate() {
                    @if idx == last {
                        input type="text" id=(format!("username-{idx}")) name=(format!("u{idx}"))
                            value=(username) placeholder="ユーザー名を入力"
                            hx-get="dashboard/form" hx-trigger="input changed delay:300ms"
                            hx-include="closest form" hx-target="#user-form" hx-swap="outerHTML";
                    } @else {
                        input type="text" id=(format!("username-{idx}")) name=(format!("u{idx}"))
                            value=(username) placeholder="ユーザー名を入力";
                    }
                }
            }
            @if model.over_capacity() {
                p class="error" role="alert" { (TOO_MANY_USERNAMES_ERROR) }
            }
            button type="submit" name="fetch" value="1" { "データを取得" }
        }
    }
}

#[must_use]
pub fn render_dashboard(model: &DashboardModel) -> Markup {
    let charts = derive_charts(&model.data);
    let summaries = summarize_all(&model.data);

    html! {
        (render_username_form(model))
        img id="loading" alt="Loading..." class="htmx-indicator" width="80" src="https://htmx.org/img/bars.svg";
        @if let Some(error) = &model.error {
            p class="error" role="alert" { "Error: " (error) }
        }
        @if !model.data.is_empty() {
            div class="results" {
                (render_chart("rating-chart", &charts.rating, Metric::Rating))
                (render_chart("performance-chart", &charts.performance, Metric::Performance))
                (render_summary_table(&summaries))
            }
        }
    }
}
