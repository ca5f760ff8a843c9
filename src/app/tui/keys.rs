use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::navigator::{Event, Mode};

pub(super) fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Resolves a key press into a navigator event for the current mode.
///
/// While filtering, printable keys (including `q`, `h` and `l`) edit the
/// filter text and `Esc` is the only way out besides clearing the text.
pub(super) fn map_key(key: KeyEvent, mode: &Mode, filter: &str) -> Event {
    match mode {
        Mode::Loading | Mode::LoadError(_) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Event::Quit,
            _ => Event::PassThrough,
        },
        Mode::Browsing => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Event::Quit,
            KeyCode::Left | KeyCode::Char('h') => Event::PreviousDay,
            KeyCode::Right | KeyCode::Char('l') => Event::NextDay,
            KeyCode::Char('/') => Event::StartFilter,
            _ => Event::PassThrough,
        },
        Mode::Filtering => match key.code {
            KeyCode::Esc => Event::CancelFilter,
            KeyCode::Backspace => {
                let mut text = filter.to_string();
                text.pop();
                Event::FilterChanged(text)
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = filter.to_string();
                text.push(ch);
                Event::FilterChanged(text)
            }
            KeyCode::Left => Event::PreviousDay,
            KeyCode::Right => Event::NextDay,
            _ => Event::PassThrough,
        },
    }
}
