use chrono::Weekday;
use log::{error, warn};

use crate::schedule::{LoadOutcome, LoadSource, ScheduleEntry, ScheduleError, ScheduleIndex, rank};

pub(crate) const ALL_DAYS_LABEL: &str = "All Days";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Loading,
    /// Terminal: the load failed and only quitting is accepted.
    LoadError(String),
    Browsing,
    Filtering,
}

/// Everything the navigator reacts to. Key bindings are resolved before an
/// event gets here.
#[derive(Debug)]
pub(crate) enum Event {
    Quit,
    PreviousDay,
    NextDay,
    StartFilter,
    FilterChanged(String),
    CancelFilter,
    Loaded(Result<LoadOutcome, ScheduleError>),
    Tick,
    Resize,
    /// Input the navigator does not own, e.g. list cursor movement.
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Unchanged,
    VisibleChanged,
    PassThrough,
    Quit,
}

/// Session cursor over the weekly schedule.
///
/// Owns the only copy of the fetched entries (inside the index) and keeps
/// `visible` in sync with mode, focused day and filter text.
#[derive(Debug)]
pub(crate) struct Navigator {
    mode: Mode,
    focused_day: Weekday,
    filter: String,
    index: ScheduleIndex,
    visible: Vec<usize>,
    source: Option<LoadSource>,
    warning: Option<String>,
}

impl Navigator {
    pub(crate) fn new(today: Weekday) -> Self {
        Self {
            mode: Mode::Loading,
            focused_day: today,
            filter: String::new(),
            index: ScheduleIndex::default(),
            visible: Vec::new(),
            source: None,
            warning: None,
        }
    }

    pub(crate) fn handle(&mut self, event: Event) -> Flow {
        match self.mode {
            Mode::Loading => self.on_loading(event),
            Mode::LoadError(_) => Self::on_load_error(event),
            Mode::Browsing => self.on_browsing(event),
            Mode::Filtering => self.on_filtering(event),
        }
    }

    fn on_loading(&mut self, event: Event) -> Flow {
        match event {
            Event::Quit => Flow::Quit,
            Event::Loaded(Ok(outcome)) => self.data_available(outcome),
            Event::Loaded(Err(err)) => {
                error!("load failed, session is quit-only: {err}");
                self.mode = Mode::LoadError(err.to_string());
                Flow::Unchanged
            }
            _ => Flow::Unchanged,
        }
    }

    fn on_load_error(event: Event) -> Flow {
        match event {
            Event::Quit => Flow::Quit,
            _ => Flow::Unchanged,
        }
    }

    fn on_browsing(&mut self, event: Event) -> Flow {
        match event {
            Event::Quit => Flow::Quit,
            Event::PreviousDay => self.focus(self.focused_day.pred()),
            Event::NextDay => self.focus(self.focused_day.succ()),
            Event::StartFilter => {
                self.mode = Mode::Filtering;
                self.filter.clear();
                self.visible = (0..self.index.len()).collect();
                Flow::VisibleChanged
            }
            Event::PassThrough => Flow::PassThrough,
            Event::FilterChanged(_)
            | Event::CancelFilter
            | Event::Loaded(_)
            | Event::Tick
            | Event::Resize => Flow::Unchanged,
        }
    }

    fn on_filtering(&mut self, event: Event) -> Flow {
        match event {
            Event::FilterChanged(text) if text.is_empty() => self.leave_filter(),
            Event::FilterChanged(text) => {
                self.filter = text;
                self.visible = self.ranked_positions();
                Flow::VisibleChanged
            }
            Event::CancelFilter => self.leave_filter(),
            Event::PassThrough => Flow::PassThrough,
            // Quit keys are text while composing; day keys are ignored.
            Event::Quit
            | Event::PreviousDay
            | Event::NextDay
            | Event::StartFilter
            | Event::Loaded(_)
            | Event::Tick
            | Event::Resize => Flow::Unchanged,
        }
    }

    fn data_available(&mut self, outcome: LoadOutcome) -> Flow {
        if let Some(warning) = &outcome.cache_warning {
            warn!("{warning}");
        }
        self.index = ScheduleIndex::build(outcome.entries);
        self.source = Some(outcome.source);
        self.warning = outcome.cache_warning;
        self.mode = Mode::Browsing;
        self.visible = self.index.positions_for(self.focused_day).to_vec();
        Flow::VisibleChanged
    }

    fn focus(&mut self, day: Weekday) -> Flow {
        self.focused_day = day;
        self.visible = self.index.positions_for(day).to_vec();
        Flow::VisibleChanged
    }

    fn leave_filter(&mut self) -> Flow {
        self.mode = Mode::Browsing;
        self.filter.clear();
        self.visible = self.index.positions_for(self.focused_day).to_vec();
        Flow::VisibleChanged
    }

    fn ranked_positions(&self) -> Vec<usize> {
        let titles: Vec<&str> = self
            .index
            .all_entries()
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        rank(&self.filter, &titles)
            .into_iter()
            .map(|(position, _)| position)
            .collect()
    }

    pub(crate) fn mode(&self) -> &Mode {
        &self.mode
    }

    pub(crate) fn focused_day(&self) -> Weekday {
        self.focused_day
    }

    pub(crate) fn filter_text(&self) -> &str {
        &self.filter
    }

    /// Focused weekday name, or the all-days marker while filtering.
    pub(crate) fn label(&self) -> &'static str {
        match self.mode {
            Mode::Filtering => ALL_DAYS_LABEL,
            _ => day_name(self.focused_day),
        }
    }

    pub(crate) fn visible_entries(&self) -> Vec<&ScheduleEntry> {
        self.visible
            .iter()
            .filter_map(|&position| self.index.entry(position))
            .collect()
    }

    pub(crate) fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub(crate) fn visible_entry(&self, row: usize) -> Option<&ScheduleEntry> {
        self.visible
            .get(row)
            .and_then(|&position| self.index.entry(position))
    }

    pub(crate) fn total_entries(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        match &self.mode {
            Mode::LoadError(detail) => Some(detail),
            _ => None,
        }
    }

    pub(crate) fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub(crate) fn source(&self) -> Option<LoadSource> {
        self.source
    }
}

pub(crate) fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
