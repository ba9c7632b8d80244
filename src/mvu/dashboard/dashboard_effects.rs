use tracing::warn;

use crate::controller::history::{HistorySource, fetch_all};
use crate::mvu::dashboard::{Effect, Msg};

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub source: &'a dyn HistorySource,
}

pub async fn run_effect(effect: Effect, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::FetchAll(usernames) => match fetch_all(deps.source, &usernames).await {
            Ok(data) => Msg::FetchSucceeded(data),
            Err(e) => {
                warn!(error = %e, "fetch cycle failed");
                Msg::FetchFailed(e.to_string())
            }
        },
    }
}
