use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::{ContestRecord, UserDataset, parse_history};

/// Where the dashboard gets a user's contest history from.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self, username: &str) -> Result<Vec<ContestRecord>, AppError>;
}

/// Goes through the `/api/users/{username}` proxy route, never the upstream directly.
pub struct ProxyHistorySource {
    client: Client,
    proxy_base: Url,
}

impl ProxyHistorySource {
    /// # Errors
    ///
    /// Will return `Err` if the http client cannot be built
    pub fn new(proxy_base: Url) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self { client, proxy_base })
    }

    /// # Errors
    ///
    /// Will return `Err` if the proxy base cannot carry a path
    pub fn request_url(&self, username: &str, timestamp_ms: i64) -> Result<Url, AppError> {
        let mut url = self.proxy_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| AppError::Other("proxy base url cannot have a path".into()))?;
            segments.pop_if_empty().extend(["api", "users", username]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("t", &timestamp_ms.to_string());
        Ok(url)
    }
}

#[async_trait]
impl HistorySource for ProxyHistorySource {
    async fn fetch_history(&self, username: &str) -> Result<Vec<ContestRecord>, AppError> {
        let url = self.request_url(username, Utc::now().timestamp_millis())?;

        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Status {
                username: username.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await?;
        parse_history(&body)
    }
}

/// Fetches every user concurrently. Either all of them arrive or none do.
///
/// # Errors
///
/// Will return the first failure among the per-user fetches
pub async fn fetch_all(
    source: &dyn HistorySource,
    usernames: &[String],
) -> Result<UserDataset, AppError> {
    info!(users = usernames.len(), "fetching contest histories");

    let fetches = usernames.iter().map(|username| async move {
        source
            .fetch_history(username)
            .await
            .map(|records| (username.clone(), records))
    });

    match try_join_all(fetches).await {
        Ok(results) => Ok(results.into_iter().collect()),
        Err(e) => {
            warn!(error = %e, "discarding batch");
            Err(e)
        }
    }
}
