use log::{debug, error, warn};

use super::error::Result;
use super::{CacheStore, FetchOptions, ScheduleEntry, ScheduleFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadSource {
    Cache,
    Network,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadOutcome {
    pub(crate) entries: Vec<ScheduleEntry>,
    pub(crate) source: LoadSource,
    pub(crate) cache_warning: Option<String>,
}

/// Serves the timetable from a fresh cache when possible, otherwise fetches
/// it and writes it through to the cache.
///
/// Cache read problems fall through to the network. Cache write problems are
/// returned as `cache_warning` and never fail the load. `refresh` skips the
/// cache read only.
pub(crate) fn load_schedule(
    cache: &CacheStore,
    fetcher: &dyn ScheduleFetcher,
    options: &FetchOptions,
    refresh: bool,
) -> Result<LoadOutcome> {
    let cacheable = options.is_cacheable();

    if cacheable && !refresh && cache.is_valid() {
        match cache.load() {
            Ok(entries) => {
                debug!("serving {} entries from cache", entries.len());
                return Ok(LoadOutcome {
                    entries,
                    source: LoadSource::Cache,
                    cache_warning: None,
                });
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => warn!("ignoring unreadable cache: {err}"),
        }
    }

    let entries = fetcher.fetch(options).inspect_err(|err| {
        error!("timetable fetch failed: {err}");
    })?;

    let mut cache_warning = None;
    if cacheable && let Err(err) = cache.save(&entries) {
        warn!("failed to save cache: {err}");
        cache_warning = Some(format!("Failed to save cache: {err}"));
    }

    Ok(LoadOutcome {
        entries,
        source: LoadSource::Network,
        cache_warning,
    })
}
