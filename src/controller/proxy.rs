use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes, Data};
use actix_web::{HttpResponse, Responder};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::AppError;

pub const UPSTREAM_STATUS_ERROR: &str = "Error fetching data";
pub const UPSTREAM_TRANSPORT_ERROR: &str = "Failed to fetch data from external API";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub upstream_base: Url,
    /// Slept before every outbound call to keep the upstream from throttling us.
    pub delay: Duration,
}

#[derive(Debug)]
pub enum UpstreamReply {
    Json(Bytes),
    Status(u16),
}

/// Outbound side of `/api/users/{username}`.
pub struct UpstreamClient {
    client: Client,
    config: ProxyConfig,
}

impl UpstreamClient {
    /// # Errors
    ///
    /// Will return `Err` if the http client cannot be built
    pub fn new(config: ProxyConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// `{upstream_base}/users/{username}/history/json`, with the username as one
    /// encoded path segment.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the upstream base cannot carry a path
    pub fn history_url(&self, username: &str) -> Result<Url, AppError> {
        let mut url = self.config.upstream_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| AppError::Other("upstream base url cannot have a path".into()))?;
            segments
                .pop_if_empty()
                .extend(["users", username, "history", "json"]);
        }
        Ok(url)
    }

    /// One delayed GET against the upstream.
    ///
    /// # Errors
    ///
    /// Will return `Err` on transport failure or when a successful response is not JSON
    pub async fn fetch_history(&self, username: &str) -> Result<UpstreamReply, AppError> {
        let url = self.history_url(username)?;
        tokio::time::sleep(self.config.delay).await;

        info!(%url, "fetching contest history");
        let resp = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(username, status = status.as_u16(), "upstream rejected request");
            return Ok(UpstreamReply::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;
        Ok(UpstreamReply::Json(body))
    }
}

/// `GET /api/users/{username}`. Query parameters only bust caches and are ignored.
pub async fn user_history(
    path: web::Path<String>,
    upstream: Data<UpstreamClient>,
) -> impl Responder {
    let username = path.into_inner();

    match upstream.fetch_history(&username).await {
        Ok(UpstreamReply::Json(body)) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Ok(UpstreamReply::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(json!({ "error": UPSTREAM_STATUS_ERROR }))
        }
        Err(e) => {
            warn!(username, error = %e, "proxy request failed");
            HttpResponse::InternalServerError().json(json!({ "error": UPSTREAM_TRANSPORT_ERROR }))
        }
    }
}
