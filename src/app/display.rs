use crate::schedule::ScheduleEntry;

pub(crate) fn display_title(entry: &ScheduleEntry) -> String {
    let title = entry.title.trim();
    if title.is_empty() {
        "Unknown Title".to_string()
    } else {
        title.to_string()
    }
}

/// `Episode 5 • Jan 2, 15:04 • sub`
pub(crate) fn describe_entry(entry: &ScheduleEntry) -> String {
    format!(
        "Episode {} • {} • {}",
        entry.episode_number,
        entry.episode_date.format("%b %-d, %H:%M"),
        entry.air_type
    )
}

pub(crate) fn air_time(entry: &ScheduleEntry) -> String {
    entry.episode_date.format("%a %H:%M").to_string()
}

pub(crate) fn episode_progress(entry: &ScheduleEntry) -> String {
    match entry.details.episodes {
        0 => entry.episode_number.to_string(),
        total => format!("{}/{total}", entry.episode_number),
    }
}

pub(crate) fn detail_lines(entry: &ScheduleEntry) -> Vec<String> {
    let details = &entry.details;
    let mut lines = vec![display_title(entry)];
    for alt in [&details.english, &details.romaji, &details.native] {
        let alt = alt.trim();
        if !alt.is_empty() && alt != entry.title.trim() {
            lines.push(alt.to_string());
        }
    }
    lines.push(String::new());
    lines.push(describe_entry(entry));
    if details.length_min > 0 {
        lines.push(format!("{} min per episode", details.length_min));
    }
    if !details.delayed_text.trim().is_empty() {
        lines.push(format!("Delayed: {}", details.delayed_text.trim()));
    }
    if !details.media_types.is_empty() {
        let kinds = details
            .media_types
            .iter()
            .map(|kind| kind.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Type: {kinds}"));
    }
    let links = details.streams.links();
    if !links.is_empty() {
        lines.push(String::new());
        lines.push("Streams".to_string());
        for (service, url) in links {
            lines.push(format!("{service}: {url}"));
        }
    }
    lines
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max.saturating_sub(3)).collect::<String>() + "..."
    } else {
        s.to_string()
    }
}
