mod display;
mod navigator;
mod tui;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use chrono::Weekday;

use crate::cli::{Cli, Command};
use crate::config::Credentials;
use crate::paths::cache_file_path;
use crate::schedule::{
    AnimeScheduleClient, CacheStore, FetchOptions, LoadOutcome, LoadSource, ScheduleError,
    ScheduleIndex, WEEK, load_schedule, resolve_timezone,
};

use self::display::{air_time, display_title, episode_progress, truncate};
use self::navigator::day_name;

/// Everything needed to produce the session's timetable.
#[derive(Debug, Clone)]
pub(crate) struct LoadPlan {
    pub(crate) cache: CacheStore,
    pub(crate) client: AnimeScheduleClient,
    pub(crate) options: FetchOptions,
    pub(crate) refresh: bool,
}

impl LoadPlan {
    fn from_cli(cli: &Cli) -> Self {
        let options = FetchOptions {
            week: cli.week,
            year: cli.year,
            ..FetchOptions::current_week(cli.air_type, resolve_timezone())
        };
        Self {
            cache: CacheStore::new(cache_file_path()),
            client: AnimeScheduleClient::from_credentials(&Credentials::default()),
            options,
            refresh: cli.refresh,
        }
    }

    pub(crate) fn load(&self) -> Result<LoadOutcome, ScheduleError> {
        load_schedule(&self.cache, &self.client, &self.options, self.refresh)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let plan = LoadPlan::from_cli(&cli);

    match cli.command {
        Some(Command::List { day }) => run_list(&plan, day)?,
        Some(Command::ClearCache) => run_clear_cache(&plan.cache)?,
        Some(Command::Tui) | None => tui::run_tui(plan)?,
    }

    Ok(())
}

fn run_list(plan: &LoadPlan, day: Option<Weekday>) -> Result<()> {
    let outcome = plan.load().context("failed to load the anime timetable")?;
    if let Some(warning) = &outcome.cache_warning {
        eprintln!("Warning: {warning}");
    }
    let source = match outcome.source {
        LoadSource::Cache => "cache",
        LoadSource::Network => "animeschedule.net",
    };
    let index = ScheduleIndex::build(outcome.entries);
    if index.is_empty() {
        println!("The timetable for {} is empty.", plan.options.timezone);
        return Ok(());
    }
    println!(
        "{} entries for {} ({}, from {source})",
        index.len(),
        plan.options.timezone,
        plan.options.air_type
    );

    let days: Vec<Weekday> = match day {
        Some(day) => vec![day],
        None => WEEK.to_vec(),
    };
    for day in days {
        println!("\n{}", day_name(day).to_uppercase());
        let mut any = false;
        for entry in index.entries_for(day) {
            any = true;
            println!(
                "  {:<10} {:<50} {:<8} {:<4}",
                air_time(entry),
                truncate(&display_title(entry), 50),
                episode_progress(entry),
                entry.air_type
            );
        }
        if !any {
            println!("  (nothing scheduled)");
        }
    }
    Ok(())
}

fn run_clear_cache(cache: &CacheStore) -> Result<()> {
    let removed = cache
        .clear()
        .with_context(|| format!("failed to clear cache at {}", cache.path().display()))?;
    if removed {
        println!("Removed cached timetable: {}", cache.path().display());
    } else {
        println!("No cached timetable at {}", cache.path().display());
    }
    Ok(())
}
