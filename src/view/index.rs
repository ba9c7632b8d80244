use maud::{DOCTYPE, Markup, html};

use crate::mvu::dashboard::DashboardModel;
use crate::view::dashboard::render_dashboard;
use crate::{CHART_JS_PATH, HTMX_PATH};

pub const INDEX_TITLE: &str = "AtCoder Multi Charts";

#[must_use]
pub fn render_index_template(model: &DashboardModel) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ja" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content="複数のAtCoderユーザーのレート推移を比較することができます";
                link rel="stylesheet" type="text/css" href="static/styles.css";
                title { (INDEX_TITLE) }
                script src=(HTMX_PATH) defer {}
                script src=(CHART_JS_PATH) defer {}
                script src="static/charts.js" defer {}
            }
            body {
                h1 { (INDEX_TITLE) }
                div id="dashboard" {
                    (render_dashboard(model))
                }
            }
        }
    }
}
