pub mod dashboard_effects;

use crate::model::UserDataset;

pub const EMPTY_INPUT_ERROR: &str = "ユーザー名を入力してください。";

pub const TOO_MANY_USERNAMES_ERROR: &str = "ユーザー名は32件までです。";

/// Most usernames one fetch will take.
pub const MAX_USERNAMES: usize = 32;

/// Room for every name plus the trailing blank.
pub const MAX_USERNAME_SLOTS: usize = MAX_USERNAMES + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardModel {
    /// Username inputs; the last one is blank unless the form is over capacity.
    pub usernames: Vec<String>,
    pub data: UserDataset,
    pub error: Option<String>,
    /// Only true inside a fetch cycle. The page relies on the htmx indicator.
    pub loading: bool,
    /// Non-blank values were submitted past the last slot.
    pub overflow: bool,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            usernames: vec![String::new()],
            data: UserDataset::new(),
            error: None,
            loading: false,
            overflow: false,
        }
    }

    /// Rebuild the form from submitted slot values by replaying them as edits.
    /// Values past the last slot are not kept but mark the model as overflowing.
    #[must_use]
    pub fn from_slots<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut model = Self::new();
        for (index, value) in values.into_iter().enumerate() {
            if index >= MAX_USERNAME_SLOTS {
                model.overflow |= !value.trim().is_empty();
                continue;
            }
            while model.usernames.len() <= index {
                model.usernames.push(String::new());
            }
            update(&mut model, Msg::UsernameChanged { index, value });
        }
        model
    }

    /// Trimmed, non-blank usernames, first occurrence wins.
    #[must_use]
    pub fn requested_usernames(&self) -> Vec<String> {
        let mut requested: Vec<String> = Vec::new();
        for name in self.usernames.iter().map(|s| s.trim()) {
            if !name.is_empty() && !requested.iter().any(|r| r == name) {
                requested.push(name.to_string());
            }
        }
        requested
    }

    /// More names were entered than one fetch takes.
    #[must_use]
    pub fn over_capacity(&self) -> bool {
        self.overflow
            || self
                .usernames
                .iter()
                .filter(|s| !s.trim().is_empty())
                .count()
                > MAX_USERNAMES
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    UsernameChanged { index: usize, value: String },
    FetchRequested,
    FetchSucceeded(UserDataset),
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll(Vec<String>),
}

pub fn update(model: &mut DashboardModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::UsernameChanged { index, value } => {
            let Some(slot) = model.usernames.get_mut(index) else {
                return vec![];
            };
            let grows = !value.trim().is_empty();
            *slot = value;
            if grows
                && index + 1 == model.usernames.len()
                && model.usernames.len() < MAX_USERNAME_SLOTS
            {
                model.usernames.push(String::new());
            }
            vec![]
        }
        Msg::FetchRequested => {
            if model.over_capacity() {
                model.error = Some(TOO_MANY_USERNAMES_ERROR.to_string());
                return vec![];
            }
            let usernames = model.requested_usernames();
            if usernames.is_empty() {
                model.error = Some(EMPTY_INPUT_ERROR.to_string());
                return vec![];
            }
            model.data.clear();
            model.error = None;
            model.loading = true;
            vec![Effect::FetchAll(usernames)]
        }
        Msg::FetchSucceeded(data) => {
            model.data = data;
            model.error = None;
            model.loading = false;
            vec![]
        }
        Msg::FetchFailed(message) => {
            model.data.clear();
            model.error = Some(message);
            model.loading = false;
            vec![]
        }
    }
}
