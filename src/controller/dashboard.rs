use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::controller::history::HistorySource;
use crate::model::{Charts, UserSummary, derive_charts, summarize_all};
use crate::mvu::dashboard::dashboard_effects::Deps;
use crate::mvu::dashboard::{DashboardModel, MAX_USERNAME_SLOTS, Msg};
use crate::mvu::runtime::run_dashboard;
use crate::view::dashboard::{render_dashboard, render_username_form};
use crate::view::index::render_index_template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    /// Slot values by position; `u0`, `u1`, ... in the query string.
    pub slots: Vec<String>,
    /// A non-blank `uN` lay past the last slot.
    pub overflow: bool,
    pub fetch: bool,
    pub want_json: bool,
}

fn flag<S: BuildHasher>(query: &HashMap<String, String, S>, key: &str) -> bool {
    match query.get(key).map(String::as_str) {
        Some("1") => true,
        Some("0") | None => false,
        Some(other) => other.parse().unwrap_or(false),
    }
}

/// Parse query parameters into a dashboard request. Unknown keys are ignored.
#[must_use]
pub fn parse_dashboard_request<S: BuildHasher>(
    query: &HashMap<String, String, S>,
) -> DashboardRequest {
    let mut overflow = false;
    let mut indexed: Vec<(usize, &String)> = Vec::new();
    for (key, value) in query {
        let Some(index) = key.strip_prefix('u').and_then(|i| i.parse::<usize>().ok()) else {
            continue;
        };
        if index < MAX_USERNAME_SLOTS {
            indexed.push((index, value));
        } else {
            overflow |= !value.trim().is_empty();
        }
    }
    indexed.sort_by_key(|(index, _)| *index);

    let mut slots = vec![String::new(); indexed.last().map_or(0, |(index, _)| index + 1)];
    for (index, value) in indexed {
        slots[index].clone_from(value);
    }

    DashboardRequest {
        slots,
        overflow,
        fetch: flag(query, "fetch"),
        want_json: flag(query, "json"),
    }
}

fn replay_slots(request: &DashboardRequest) -> DashboardModel {
    let mut model = DashboardModel::from_slots(request.slots.iter().cloned());
    model.overflow |= request.overflow;
    model
}

/// Replays the request through the dashboard model, fetching if asked to.
pub async fn load_dashboard(request: &DashboardRequest, source: &dyn HistorySource) -> DashboardModel {
    let mut model = replay_slots(request);
    if request.fetch {
        run_dashboard(&mut model, Msg::FetchRequested, Deps { source }).await;
    }
    model
}

#[derive(Debug, Serialize)]
pub struct DashboardJson {
    pub usernames: Vec<String>,
    pub error: Option<String>,
    pub charts: Charts,
    pub summaries: Vec<UserSummary>,
}

impl From<&DashboardModel> for DashboardJson {
    fn from(model: &DashboardModel) -> Self {
        Self {
            usernames: model.usernames.clone(),
            error: model.error.clone(),
            charts: derive_charts(&model.data),
            summaries: summarize_all(&model.data),
        }
    }
}

fn html(markup: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}

/// `GET /`, the whole page. Also the no-javascript form target.
pub async fn index(
    query: web::Query<HashMap<String, String>>,
    source: Data<dyn HistorySource>,
) -> impl Responder {
    let request = parse_dashboard_request(&query.into_inner());
    let model = load_dashboard(&request, source.get_ref()).await;
    html(render_index_template(&model))
}

/// `GET /dashboard`, the htmx fragment, or JSON with `json=1`.
pub async fn dashboard(
    query: web::Query<HashMap<String, String>>,
    source: Data<dyn HistorySource>,
) -> impl Responder {
    let request = parse_dashboard_request(&query.into_inner());
    let model = load_dashboard(&request, source.get_ref()).await;
    if request.want_json {
        HttpResponse::Ok().json(DashboardJson::from(&model))
    } else {
        html(render_dashboard(&model))
    }
}

/// `GET /dashboard/form`, only the inputs; fired while typing in the last slot.
pub async fn dashboard_form(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let request = parse_dashboard_request(&query.into_inner());
    html(render_username_form(&replay_slots(&request)))
}
