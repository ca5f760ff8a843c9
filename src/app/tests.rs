use std::sync::mpsc;

use chrono::Weekday;

use crate::schedule::fixtures::entry;
use crate::schedule::{
    AirType, CacheStore, FetchOptions, LoadOutcome, LoadSource, ScheduleEntry, ScheduleError,
    ScheduleFetcher, WEEK, load_schedule,
};

use super::navigator::{ALL_DAYS_LABEL, Event, Flow, Mode, Navigator};

fn outcome(entries: Vec<ScheduleEntry>) -> LoadOutcome {
    LoadOutcome {
        entries,
        source: LoadSource::Network,
        cache_warning: None,
    }
}

fn week_sample() -> Vec<ScheduleEntry> {
    // 2024-01-01 is a Monday.
    vec![
        entry("Show B", "2024-01-01T20:00:00+00:00"),
        entry("Show C", "2024-01-02T18:00:00+00:00"),
        entry("Show A", "2024-01-01T09:00:00+00:00"),
    ]
}

fn browsing(today: Weekday, entries: Vec<ScheduleEntry>) -> Navigator {
    let mut navigator = Navigator::new(today);
    let flow = navigator.handle(Event::Loaded(Ok(outcome(entries))));
    assert_eq!(flow, Flow::VisibleChanged);
    navigator
}

fn visible_titles(navigator: &Navigator) -> Vec<String> {
    navigator
        .visible_entries()
        .iter()
        .map(|entry| entry.title.clone())
        .collect()
}

fn type_filter(navigator: &mut Navigator, text: &str) -> Flow {
    navigator.handle(Event::FilterChanged(text.to_string()))
}

#[test]
fn starts_loading_and_ignores_input_until_data_arrives() {
    let mut navigator = Navigator::new(Weekday::Mon);
    assert_eq!(*navigator.mode(), Mode::Loading);
    assert_eq!(navigator.handle(Event::NextDay), Flow::Unchanged);
    assert_eq!(navigator.handle(Event::StartFilter), Flow::Unchanged);
    assert_eq!(navigator.handle(Event::Tick), Flow::Unchanged);
    assert_eq!(navigator.focused_day(), Weekday::Mon);
    assert_eq!(*navigator.mode(), Mode::Loading);
    assert_eq!(navigator.handle(Event::Quit), Flow::Quit);
}

#[test]
fn weekly_scenario_navigates_and_wraps_back() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    assert_eq!(*navigator.mode(), Mode::Browsing);
    assert_eq!(navigator.label(), "Monday");
    assert_eq!(visible_titles(&navigator), vec!["Show A", "Show B"]);

    assert_eq!(navigator.handle(Event::NextDay), Flow::VisibleChanged);
    assert_eq!(navigator.focused_day(), Weekday::Tue);
    assert_eq!(visible_titles(&navigator), vec!["Show C"]);

    for _ in 0..6 {
        navigator.handle(Event::NextDay);
    }
    assert_eq!(navigator.focused_day(), Weekday::Mon);
    assert_eq!(visible_titles(&navigator), vec!["Show A", "Show B"]);
}

#[test]
fn day_navigation_is_cyclic_from_every_day() {
    for start in WEEK {
        let mut navigator = browsing(start, Vec::new());
        for _ in 0..7 {
            navigator.handle(Event::NextDay);
        }
        assert_eq!(navigator.focused_day(), start);

        navigator.handle(Event::NextDay);
        navigator.handle(Event::PreviousDay);
        assert_eq!(navigator.focused_day(), start);
    }
}

#[test]
fn previous_from_monday_wraps_to_sunday() {
    let mut navigator = browsing(Weekday::Mon, Vec::new());
    navigator.handle(Event::PreviousDay);
    assert_eq!(navigator.focused_day(), Weekday::Sun);
    assert_eq!(navigator.label(), "Sunday");
    assert_eq!(navigator.visible_len(), 0);
}

#[test]
fn starting_a_filter_shows_every_day() {
    let mut navigator = browsing(Weekday::Tue, week_sample());
    assert_eq!(navigator.handle(Event::StartFilter), Flow::VisibleChanged);
    assert_eq!(*navigator.mode(), Mode::Filtering);
    assert_eq!(navigator.label(), ALL_DAYS_LABEL);
    assert!(navigator.filter_text().is_empty());
    assert_eq!(
        visible_titles(&navigator),
        vec!["Show B", "Show C", "Show A"]
    );
}

#[test]
fn filter_text_ranks_across_days() {
    let entries = vec![
        entry("Show A", "2024-01-01T09:00:00+00:00"),
        entry("Random", "2024-01-03T09:00:00+00:00"),
        entry("shown up", "2024-01-05T09:00:00+00:00"),
    ];
    let mut navigator = browsing(Weekday::Wed, entries);
    navigator.handle(Event::StartFilter);

    assert_eq!(type_filter(&mut navigator, "sho"), Flow::VisibleChanged);
    assert_eq!(navigator.filter_text(), "sho");
    assert_eq!(visible_titles(&navigator), vec!["Show A", "shown up"]);
}

#[test]
fn ranked_results_put_substring_hits_first() {
    // Scattered letters past the position bonus span only earn the base
    // points, so the exact match wins.
    let scattered = format!("{}s-h-o-w", "-".repeat(52));
    let entries = vec![
        entry(&scattered, "2024-01-01T09:00:00+00:00"),
        entry("The Show", "2024-01-02T09:00:00+00:00"),
    ];
    let mut navigator = browsing(Weekday::Mon, entries);
    navigator.handle(Event::StartFilter);
    type_filter(&mut navigator, "show");
    assert_eq!(
        visible_titles(&navigator),
        vec!["The Show".to_string(), scattered]
    );
}

#[test]
fn cancel_restores_pre_filter_view() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    navigator.handle(Event::NextDay);
    let before_titles = visible_titles(&navigator);
    let before_label = navigator.label();

    navigator.handle(Event::StartFilter);
    assert_eq!(navigator.handle(Event::CancelFilter), Flow::VisibleChanged);

    assert_eq!(*navigator.mode(), Mode::Browsing);
    assert_eq!(visible_titles(&navigator), before_titles);
    assert_eq!(navigator.label(), before_label);
    assert_eq!(navigator.focused_day(), Weekday::Tue);
}

#[test]
fn clearing_filter_text_returns_to_browsing() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    navigator.handle(Event::StartFilter);
    type_filter(&mut navigator, "c");
    assert_eq!(visible_titles(&navigator), vec!["Show C"]);

    type_filter(&mut navigator, "");
    assert_eq!(*navigator.mode(), Mode::Browsing);
    assert!(navigator.filter_text().is_empty());
    assert_eq!(navigator.label(), "Monday");
    assert_eq!(visible_titles(&navigator), vec!["Show A", "Show B"]);
}

#[test]
fn day_keys_and_quit_are_ignored_while_filtering() {
    let mut navigator = browsing(Weekday::Fri, week_sample());
    navigator.handle(Event::StartFilter);
    type_filter(&mut navigator, "show");

    assert_eq!(navigator.handle(Event::NextDay), Flow::Unchanged);
    assert_eq!(navigator.handle(Event::PreviousDay), Flow::Unchanged);
    assert_eq!(navigator.handle(Event::Quit), Flow::Unchanged);
    assert_eq!(navigator.focused_day(), Weekday::Fri);
    assert_eq!(*navigator.mode(), Mode::Filtering);
    assert_eq!(navigator.filter_text(), "show");
}

#[test]
fn unmatched_filter_leaves_an_empty_visible_set() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    navigator.handle(Event::StartFilter);
    type_filter(&mut navigator, "zzz");
    assert_eq!(*navigator.mode(), Mode::Filtering);
    assert_eq!(navigator.visible_len(), 0);
    assert!(navigator.visible_entry(0).is_none());
}

#[test]
fn unrecognized_input_is_passed_through() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    assert_eq!(navigator.handle(Event::PassThrough), Flow::PassThrough);
    navigator.handle(Event::StartFilter);
    assert_eq!(navigator.handle(Event::PassThrough), Flow::PassThrough);
}

#[test]
fn load_failure_is_terminal_and_quit_only() {
    let mut navigator = Navigator::new(Weekday::Mon);
    let err = ScheduleError::missing_credential("ANIMESCHEDULE_TOKEN");
    assert_eq!(navigator.handle(Event::Loaded(Err(err))), Flow::Unchanged);

    assert_eq!(
        navigator.last_error(),
        Some("ANIMESCHEDULE_TOKEN environment variable not set")
    );
    assert_eq!(navigator.handle(Event::StartFilter), Flow::Unchanged);
    assert_eq!(navigator.handle(Event::NextDay), Flow::Unchanged);
    assert_eq!(
        navigator.handle(Event::Loaded(Ok(outcome(week_sample())))),
        Flow::Unchanged
    );
    assert!(matches!(navigator.mode(), Mode::LoadError(_)));
    assert_eq!(navigator.handle(Event::Quit), Flow::Quit);
}

#[test]
fn cache_write_warning_does_not_block_browsing() {
    let mut navigator = Navigator::new(Weekday::Tue);
    let loaded = LoadOutcome {
        entries: week_sample(),
        source: LoadSource::Network,
        cache_warning: Some("Failed to save cache: disk full".to_string()),
    };
    navigator.handle(Event::Loaded(Ok(loaded)));

    assert_eq!(*navigator.mode(), Mode::Browsing);
    assert_eq!(navigator.warning(), Some("Failed to save cache: disk full"));
    assert_eq!(visible_titles(&navigator), vec!["Show C"]);
}

#[test]
fn second_completion_is_ignored_once_browsing() {
    let mut navigator = browsing(Weekday::Mon, week_sample());
    let flow = navigator.handle(Event::Loaded(Ok(outcome(Vec::new()))));
    assert_eq!(flow, Flow::Unchanged);
    assert_eq!(navigator.total_entries(), 3);
}

struct StaticFetcher(Vec<ScheduleEntry>);

impl ScheduleFetcher for StaticFetcher {
    fn fetch(&self, _options: &FetchOptions) -> Result<Vec<ScheduleEntry>, ScheduleError> {
        Ok(self.0.clone())
    }
}

#[test]
fn startup_fetch_then_cached_session_show_same_view() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = CacheStore::new(dir.path().join("baka").join("anime_schedule.json"));
    let options = FetchOptions::current_week(AirType::Sub, "UTC");
    let fetcher = StaticFetcher(week_sample());

    let first = load_schedule(&cache, &fetcher, &options, false).expect("first load");
    assert_eq!(first.source, LoadSource::Network);
    let mut first_session = Navigator::new(Weekday::Mon);
    first_session.handle(Event::Loaded(Ok(first)));

    let second = load_schedule(&cache, &StaticFetcher(Vec::new()), &options, false)
        .expect("second load");
    assert_eq!(second.source, LoadSource::Cache);
    let mut second_session = Navigator::new(Weekday::Mon);
    second_session.handle(Event::Loaded(Ok(second)));

    assert_eq!(visible_titles(&first_session), visible_titles(&second_session));
    assert_eq!(second_session.source(), Some(LoadSource::Cache));
}

#[test]
fn background_load_result_arrives_as_one_event() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = CacheStore::new(dir.path().join("anime_schedule.json"));
    let (tx, rx) = mpsc::channel();
    let options = FetchOptions::current_week(AirType::Sub, "UTC");

    std::thread::spawn(move || {
        let fetcher = StaticFetcher(week_sample());
        let _ = tx.send(load_schedule(&cache, &fetcher, &options, false));
    });

    let result = rx.recv().expect("loader result");
    let mut navigator = Navigator::new(Weekday::Tue);
    assert_eq!(navigator.handle(Event::Loaded(result)), Flow::VisibleChanged);
    assert_eq!(visible_titles(&navigator), vec!["Show C"]);
}
