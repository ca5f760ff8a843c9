use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;

use crate::schedule::{
    CacheStore, FetchOptions, LoadOutcome, ScheduleError, ScheduleFetcher, load_schedule,
};

use super::super::navigator::Navigator;

pub(super) type LoadResult = Result<LoadOutcome, ScheduleError>;

/// Runs cache-or-fetch off the UI thread; the single result arrives on `tx`.
pub(super) fn spawn_load<F>(
    cache: CacheStore,
    fetcher: F,
    options: FetchOptions,
    refresh: bool,
    tx: mpsc::Sender<LoadResult>,
) where
    F: ScheduleFetcher + Send + 'static,
{
    std::thread::spawn(move || {
        let result = load_schedule(&cache, &fetcher, &options, refresh);
        let _ = tx.send(result);
    });
}

pub(super) fn take_load_result(rx: &mpsc::Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(mpsc::TryRecvError::Empty) => None,
        Err(mpsc::TryRecvError::Disconnected) => Some(Err(ScheduleError::request(
            "loader stopped without a result",
        ))),
    }
}

pub(super) fn reset_selection(navigator: &Navigator, table_state: &mut TableState) {
    table_state.select((navigator.visible_len() > 0).then_some(0));
}

pub(super) enum ListAction {
    Moved,
    Open(usize),
    Ignored,
}

/// Cursor movement and activation inside the visible list.
pub(super) fn apply_list_key(
    key: KeyEvent,
    len: usize,
    table_state: &mut TableState,
    allow_letters: bool,
) -> ListAction {
    if len == 0 {
        table_state.select(None);
        return ListAction::Ignored;
    }
    let selected = table_state.selected().unwrap_or(0).min(len - 1);
    let next = match key.code {
        KeyCode::Up => selected.saturating_sub(1),
        KeyCode::Char('k') if allow_letters => selected.saturating_sub(1),
        KeyCode::Down => (selected + 1).min(len - 1),
        KeyCode::Char('j') if allow_letters => (selected + 1).min(len - 1),
        KeyCode::PageUp => selected.saturating_sub(10),
        KeyCode::PageDown => (selected + 10).min(len - 1),
        KeyCode::Home => 0,
        KeyCode::End => len - 1,
        KeyCode::Enter => return ListAction::Open(selected),
        _ => return ListAction::Ignored,
    };
    table_state.select(Some(next));
    ListAction::Moved
}

pub(super) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(super) fn status_warning(msg: &str) -> String {
    format!("WARN: {msg}")
}
