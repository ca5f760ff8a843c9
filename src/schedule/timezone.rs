use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_TIMEZONE: &str = "Asia/Kolkata";

/// Timezone identifier the timetable should be normalized against.
///
/// `TZ` wins, then the `/etc/localtime` link target, then `/etc/timezone`.
pub(crate) fn resolve_timezone() -> String {
    resolve_timezone_from(
        env::var("TZ").ok(),
        Path::new("/etc/localtime"),
        Path::new("/etc/timezone"),
    )
}

pub(crate) fn resolve_timezone_from(
    override_tz: Option<String>,
    localtime_link: &Path,
    timezone_file: &Path,
) -> String {
    if let Some(tz) = override_tz.filter(|tz| !tz.trim().is_empty()) {
        return tz.trim().to_string();
    }

    if let Ok(target) = fs::read_link(localtime_link)
        && let Some(tz) = zone_from_link_target(&target.to_string_lossy())
    {
        return tz;
    }

    if let Ok(raw) = fs::read_to_string(timezone_file) {
        let tz = raw.trim();
        if !tz.is_empty() {
            return tz.to_string();
        }
    }

    FALLBACK_TIMEZONE.to_string()
}

fn zone_from_link_target(target: &str) -> Option<String> {
    let (_, zone) = target.split_once("zoneinfo/")?;
    let zone = zone.trim_matches('/');
    (!zone.is_empty()).then(|| zone.to_string())
}
