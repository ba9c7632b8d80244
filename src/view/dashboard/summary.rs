use maud::{Markup, html};

use crate::model::{Stat, UserSummary};

fn signed(stat: Stat) -> String {
    match stat {
        Stat::Value(v) if v > 0 => format!("+{v}"),
        other => other.to_string(),
    }
}

pub fn render_summary_table(summaries: &[UserSummary]) -> Markup {
    html! {
        h2 { "統計" }
        table class="summary-table" {
            thead {
                tr {
                    th { "ユーザー" }
                    th { "コンテスト数" }
                    th { "最高レート" }
                    th { "最新レート" }
                    th { "前回からの変化" }
                }
            }
            tbody {
                @for summary in summaries {
                    tr {
                        td {
                            (summary.username)
                            @if summary.invalid_username_hint {
                                span class="hint" { " (ユーザー名が正しくない可能性があります)" }
                            }
                        }
                        td { (summary.contest_count) }
                        td { (summary.max_rating) }
                        td { (summary.latest_rating) }
                        td { (signed(summary.latest_change)) }
                    }
                }
            }
        }
    }
}
