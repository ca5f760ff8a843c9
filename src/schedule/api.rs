use log::debug;

use crate::config::Credentials;
use crate::http::{HttpFailure, RequestPolicy, get_text};

use super::error::{Result, ScheduleError};
use super::{FetchOptions, ScheduleEntry, ScheduleFetcher};

const TIMETABLES_URL: &str = "https://animeschedule.net/api/v3/timetables";
pub(crate) const TOKEN_KEY: &str = "ANIMESCHEDULE_TOKEN";

/// Timetable client for animeschedule.net.
///
/// The token is looked up when the client is built but only required once a
/// request is actually made, so a fresh cache works without credentials.
#[derive(Debug, Clone)]
pub(crate) struct AnimeScheduleClient {
    base_url: String,
    token: Option<String>,
    policy: RequestPolicy,
}

impl AnimeScheduleClient {
    pub(crate) fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            base_url: TIMETABLES_URL.to_string(),
            token: credentials.lookup(TOKEN_KEY),
            policy: RequestPolicy::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(
        base_url: impl Into<String>,
        token: Option<&str>,
        policy: RequestPolicy,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.map(str::to_string),
            policy,
        }
    }

    fn endpoint(&self, options: &FetchOptions) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            options.air_type.as_str()
        )
    }
}

pub(crate) fn timetable_query(options: &FetchOptions) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(week) = options.week.filter(|week| *week > 0) {
        query.push(("week".to_string(), week.to_string()));
    }
    if let Some(year) = options.year.filter(|year| *year > 0) {
        query.push(("year".to_string(), year.to_string()));
    }
    if !options.timezone.is_empty() {
        query.push(("tz".to_string(), options.timezone.clone()));
    }
    query
}

impl ScheduleFetcher for AnimeScheduleClient {
    fn fetch(&self, options: &FetchOptions) -> Result<Vec<ScheduleEntry>> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ScheduleError::missing_credential(TOKEN_KEY))?;
        let url = self.endpoint(options);
        debug!("fetching timetable from {url} with {options:?}");

        let authorization = format!("Bearer {token}");
        let body = get_text(
            &url,
            &[
                ("Authorization", authorization.as_str()),
                ("Accept", "application/json"),
            ],
            &timetable_query(options),
            &self.policy,
        )
        .map_err(|failure| match failure {
            HttpFailure::Status { status, body } => ScheduleError::Status { status, body },
            HttpFailure::Transport(detail) => ScheduleError::request(detail),
        })?;

        let entries: Vec<ScheduleEntry> =
            serde_json::from_str(&body).map_err(|source| ScheduleError::Decode { source })?;
        debug!("timetable returned {} entries", entries.len());
        Ok(entries)
    }
}
