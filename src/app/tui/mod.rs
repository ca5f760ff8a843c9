mod actions;
mod keys;
mod render;
mod session;

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;

use crate::schedule::LoadSource;

use super::LoadPlan;
use super::navigator::{Event, Flow, Mode, Navigator};

use self::actions::{
    ListAction, apply_list_key, reset_selection, spawn_load, status_info, status_warning,
    take_load_result,
};
use self::keys::{is_interrupt, map_key};
use self::render::draw_tui;
use self::session::TerminalSession;

const POLL_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy)]
pub(super) struct DetailsPopup {
    pub(super) row: usize,
}

pub(crate) fn run_tui(plan: LoadPlan) -> Result<()> {
    let session = TerminalSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let LoadPlan {
        cache,
        client,
        options,
        refresh,
    } = plan;
    let (load_tx, load_rx) = mpsc::channel();
    spawn_load(cache, client, options.clone(), refresh, load_tx);
    let mut load_pending = true;

    let mut navigator = Navigator::new(Local::now().weekday());
    let mut table_state = TableState::default();
    let mut details = None::<DetailsPopup>;
    let mut spinner_frame = 0_usize;
    let mut status = status_info("Fetching anime timetable...");

    loop {
        if load_pending && let Some(result) = take_load_result(&load_rx) {
            load_pending = false;
            if navigator.handle(Event::Loaded(result)) == Flow::VisibleChanged {
                reset_selection(&navigator, &mut table_state);
                status = loaded_status(&navigator);
            }
        }

        terminal.draw(|frame| {
            draw_tui(
                frame,
                &navigator,
                &mut table_state,
                &status,
                details,
                spinner_frame,
                &options,
            )
        })?;

        if !event::poll(POLL_INTERVAL)? {
            navigator.handle(Event::Tick);
            spinner_frame = spinner_frame.wrapping_add(1);
            continue;
        }

        let key = match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => key,
            TermEvent::Resize(..) => {
                navigator.handle(Event::Resize);
                continue;
            }
            _ => continue,
        };

        if is_interrupt(&key) {
            break;
        }

        if details.is_some() {
            details = None;
            continue;
        }

        let event = map_key(key, navigator.mode(), navigator.filter_text());
        match navigator.handle(event) {
            Flow::Quit => break,
            Flow::VisibleChanged => reset_selection(&navigator, &mut table_state),
            Flow::PassThrough => {
                let browsing = *navigator.mode() == Mode::Browsing;
                let action =
                    apply_list_key(key, navigator.visible_len(), &mut table_state, browsing);
                if let ListAction::Open(row) = action {
                    details = Some(DetailsPopup { row });
                }
            }
            Flow::Unchanged => {}
        }
    }

    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}

fn loaded_status(navigator: &Navigator) -> String {
    if let Some(warning) = navigator.warning() {
        return status_warning(warning);
    }
    let total = navigator.total_entries();
    match navigator.source() {
        Some(LoadSource::Cache) => status_info(&format!("Loaded {total} entries from cache.")),
        Some(LoadSource::Network) | None => status_info(&format!("Fetched {total} entries.")),
    }
}
