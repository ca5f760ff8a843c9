use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::debug;

use super::ScheduleEntry;
use super::error::{Result, ScheduleError};

pub(crate) const FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Flat JSON snapshot of the last fetched timetable.
///
/// The file's modification time is the snapshot's age; nothing else is
/// stored besides the entries.
#[derive(Debug, Clone)]
pub(crate) struct CacheStore {
    path: PathBuf,
    max_age: Duration,
}

impl CacheStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: FRESHNESS_WINDOW,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.is_valid_at(SystemTime::now())
    }

    /// Fresh iff the file exists and `now - mtime < max_age`. A modification
    /// time in the future counts as age zero.
    pub(crate) fn is_valid_at(&self, now: SystemTime) -> bool {
        let Ok(modified) = fs::metadata(&self.path).and_then(|meta| meta.modified()) else {
            return false;
        };
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        debug!(
            "cache {} is {}s old (window {}s)",
            self.path.display(),
            age.as_secs(),
            self.max_age.as_secs()
        );
        age < self.max_age
    }

    pub(crate) fn load(&self) -> Result<Vec<ScheduleEntry>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ScheduleError::CacheMissing {
                    path: self.path.clone(),
                }
            } else {
                ScheduleError::CacheRead {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&raw).map_err(|source| ScheduleError::CacheParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the snapshot. The new content is written next to the cache
    /// file and renamed over it so a failed write never leaves a torn file.
    pub(crate) fn save(&self, entries: &[ScheduleEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ScheduleError::CacheDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(entries)
            .map_err(|source| ScheduleError::CacheSerialize { source })?;

        let staging = self.staging_path();
        fs::write(&staging, data).map_err(|source| ScheduleError::CacheWrite {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| {
            let _ = fs::remove_file(&staging);
            ScheduleError::CacheWrite {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!("cached {} entries at {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Removes the snapshot. Returns whether a file was deleted.
    pub(crate) fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ScheduleError::CacheWrite {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
