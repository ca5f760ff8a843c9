mod api;
mod cache;
mod error;
mod fuzzy;
mod index;
mod loader;
mod timezone;

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

pub(crate) use api::AnimeScheduleClient;
pub(crate) use cache::CacheStore;
pub(crate) use error::ScheduleError;
pub(crate) use fuzzy::rank;
pub(crate) use index::{ScheduleIndex, WEEK};
pub(crate) use loader::{LoadOutcome, LoadSource, load_schedule};
pub(crate) use timezone::resolve_timezone;

/// One broadcast occurrence as returned by the timetable endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) episode_number: u32,
    #[serde(default = "unset_episode_date", deserialize_with = "null_as_unset_date")]
    pub(crate) episode_date: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) air_type: String,
    #[serde(flatten)]
    pub(crate) details: EntryDetails,
}

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
const UNSET_TIMESTAMP: i64 = -62_135_596_800;

/// Timestamp given to entries that arrive without one: midnight UTC on
/// 0001-01-01, a Monday.
pub(crate) fn unset_episode_date() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(UNSET_TIMESTAMP, 0)
        .unwrap_or_default()
        .fixed_offset()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_unset_date<'de, D>(
    deserializer: D,
) -> std::result::Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<FixedOffset>>::deserialize(deserializer)
        .map(|date| date.unwrap_or_else(unset_episode_date))
}

/// Presentation metadata carried alongside an entry. The engine never looks
/// inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct EntryDetails {
    pub(crate) route: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) romaji: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) english: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) native: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) delayed_text: String,
    pub(crate) delayed_from: Option<DateTime<FixedOffset>>,
    pub(crate) delayed_until: Option<DateTime<FixedOffset>>,
    pub(crate) status: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub(crate) subtracted_episode_number: u32,
    pub(crate) episodes: u32,
    pub(crate) length_min: u32,
    pub(crate) donghua: bool,
    pub(crate) media_types: Vec<MediaType>,
    pub(crate) image_version_route: String,
    pub(crate) streams: Streams,
    pub(crate) airing_status: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MediaType {
    pub(crate) name: String,
    pub(crate) route: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Streams {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) crunchyroll: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) amazon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) hidive: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) youtube: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) apple: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) netflix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub(crate) hulu: String,
}

impl Streams {
    /// Non-empty `(service, url)` pairs in a fixed display order.
    pub(crate) fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Crunchyroll", self.crunchyroll.as_str()),
            ("Amazon", self.amazon.as_str()),
            ("HIDIVE", self.hidive.as_str()),
            ("YouTube", self.youtube.as_str()),
            ("Apple", self.apple.as_str()),
            ("Netflix", self.netflix.as_str()),
            ("Hulu", self.hulu.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum AirType {
    #[default]
    Sub,
    Dub,
    Raw,
    All,
}

impl AirType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Sub => "sub",
            Self::Dub => "dub",
            Self::Raw => "raw",
            Self::All => "all",
        }
    }
}

impl fmt::Display for AirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request options handed to a [`ScheduleFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchOptions {
    pub(crate) air_type: AirType,
    pub(crate) timezone: String,
    pub(crate) week: Option<u32>,
    pub(crate) year: Option<i32>,
}

impl FetchOptions {
    pub(crate) fn current_week(air_type: AirType, timezone: impl Into<String>) -> Self {
        Self {
            air_type,
            timezone: timezone.into(),
            week: None,
            year: None,
        }
    }

    /// Only the default current-week `sub` request shares the cache file.
    /// A zero week or year is not sent, so it still counts as the default.
    pub(crate) fn is_cacheable(&self) -> bool {
        self.air_type == AirType::Sub
            && self.week.is_none_or(|week| week == 0)
            && self.year.is_none_or(|year| year <= 0)
    }
}

pub(crate) trait ScheduleFetcher {
    fn fetch(&self, options: &FetchOptions) -> error::Result<Vec<ScheduleEntry>>;
}
