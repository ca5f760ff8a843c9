use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Padding, Paragraph, Row, Table, TableState, Wrap,
};

use crate::schedule::FetchOptions;

use super::super::display::{air_time, detail_lines, display_title, episode_progress, truncate};
use super::super::navigator::{Mode, Navigator, day_name};
use super::DetailsPopup;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const ACCENT: Color = Color::Rgb(37, 160, 101);

pub(super) fn draw_tui(
    frame: &mut Frame,
    navigator: &Navigator,
    table_state: &mut TableState,
    status: &str,
    details: Option<DetailsPopup>,
    spinner_frame: usize,
    options: &FetchOptions,
) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    match navigator.mode() {
        Mode::Loading => {
            let spinner = SPINNER[spinner_frame % SPINNER.len()];
            draw_centered(
                frame,
                &format!("{spinner} Fetching anime timetable...\n\nPress q to quit"),
                Style::default().fg(Color::Rgb(230, 230, 230)),
            );
        }
        Mode::LoadError(_) => {
            let detail = navigator.last_error().unwrap_or_default();
            draw_centered(
                frame,
                &format!("Error: {detail}\n\nPress q to quit"),
                Style::default()
                    .fg(Color::Rgb(255, 145, 120))
                    .add_modifier(Modifier::BOLD),
            );
        }
        Mode::Browsing | Mode::Filtering => {
            draw_schedule(frame, navigator, table_state, status, options);
            if let Some(popup) = details
                && let Some(entry) = navigator.visible_entry(popup.row)
            {
                let text = detail_lines(entry)
                    .iter()
                    .map(|line| truncate(line, 64))
                    .collect::<Vec<_>>()
                    .join("\n");
                let area = popup_rect_for_text(frame.area(), &text);
                render_popup_shadow(frame, area);
                frame.render_widget(Clear, area);
                let popup = Paragraph::new(text)
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: false })
                    .block(modal_block("Details"));
                frame.render_widget(popup, area);
            }
        }
    }
}

fn draw_schedule(
    frame: &mut Frame,
    navigator: &Navigator,
    table_state: &mut TableState,
    status: &str,
    options: &FetchOptions,
) {
    let filtering = *navigator.mode() == Mode::Filtering;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {:<9} ", navigator.label()),
            Style::default()
                .fg(Color::Rgb(255, 253, 245))
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("{} shows", navigator.visible_len()),
            Style::default().fg(Color::Rgb(185, 195, 210)),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("{} • {}", options.timezone, options.air_type),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel_block("Schedule"));
    frame.render_widget(header, chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(chunks[1]);

    let entries = navigator.visible_entries();
    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(air_time(entry)),
                Cell::from(display_title(entry)),
                Cell::from(episode_progress(entry)),
                Cell::from(entry.air_type.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(vec!["Airs", "Title", "Ep", "Type"]).style(
            Style::default()
                .fg(Color::Rgb(110, 170, 255))
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(panel_block(if filtering { "Search Results" } else { "Airing" }))
    .row_highlight_style(
        Style::default()
            .bg(Color::Rgb(110, 170, 255))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, body_chunks[0], table_state);

    let selection_text = match table_state.selected().and_then(|row| entries.get(row)) {
        Some(entry) => detail_lines(entry)
            .iter()
            .map(|line| truncate(line, 40))
            .collect::<Vec<_>>()
            .join("\n"),
        None if filtering => "No matches.\n\nKeep typing or press Esc.".to_string(),
        None => format!(
            "Nothing airs on {}.\n\nUse ←/→ to pick another day.",
            day_name(navigator.focused_day())
        ),
    };
    let selection = Paragraph::new(selection_text)
        .style(Style::default().fg(Color::Rgb(230, 230, 230)))
        .wrap(Wrap { trim: true })
        .block(panel_block("Selected"));
    frame.render_widget(selection, body_chunks[1]);

    let search_line = if filtering {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(ACCENT)),
            Span::styled(
                truncate(navigator.filter_text(), 50),
                Style::default().fg(Color::Rgb(230, 235, 242)),
            ),
            Span::styled("█", Style::default().fg(ACCENT)),
        ])
    } else {
        Line::from(Span::styled(
            "press / to search every day",
            Style::default().fg(Color::Rgb(125, 135, 150)),
        ))
    };
    frame.render_widget(
        Paragraph::new(search_line).block(panel_block("Search")),
        chunks[2],
    );

    let hints = if filtering {
        "type to filter  ↑/↓ move  Enter details  Backspace edit  Esc cancel"
    } else {
        "←/→ h/l day  ↑/↓ j/k move  Enter details  / search  q quit"
    };
    let controls = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::Rgb(185, 195, 210)),
    )))
    .alignment(Alignment::Center)
    .block(panel_block("Controls"));
    frame.render_widget(controls, chunks[3]);

    let status_widget = Paragraph::new(status.to_string())
        .style(status_style(status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[4]);
}

fn draw_centered(frame: &mut Frame, text: &str, style: Style) {
    let area = popup_rect_for_text(frame.area(), text);
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(modal_block("baka"));
    frame.render_widget(paragraph, area);
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn modal_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(Color::Rgb(205, 120, 235))
                .add_modifier(Modifier::BOLD),
        )
        .title(title)
        .padding(Padding::new(2, 2, 1, 1))
}

fn status_style(status: &str) -> Style {
    if status.starts_with("WARN:") {
        Style::default()
            .fg(Color::Rgb(255, 200, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(4, 181, 117))
    } else {
        Style::default().fg(Color::Rgb(230, 235, 242))
    }
}

fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width.max(1));
    let clamped_height = height.min(area.height.max(1));
    let x = area.x + area.width.saturating_sub(clamped_width) / 2;
    let y = area.y + area.height.saturating_sub(clamped_height) / 2;
    Rect::new(x, y, clamped_width, clamped_height)
}

fn render_popup_shadow(frame: &mut Frame, popup_area: Rect) {
    let area = frame.area();
    let shadow = Rect::new(
        (popup_area.x + 1).min(area.x + area.width.saturating_sub(1)),
        (popup_area.y + 1).min(area.y + area.height.saturating_sub(1)),
        popup_area.width.saturating_sub(1),
        popup_area.height.saturating_sub(1),
    );
    if shadow.width == 0 || shadow.height == 0 {
        return;
    }
    let shadow_block = Block::default().style(Style::default().bg(Color::Rgb(14, 16, 24)));
    frame.render_widget(shadow_block, shadow);
}

fn popup_rect_for_text(area: Rect, text: &str) -> Rect {
    let max_line_width = text
        .lines()
        .map(|line| line.chars().count() as u16)
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count() as u16;

    let available_width = area.width.saturating_sub(2).max(1);
    let width = max_line_width
        .saturating_add(8)
        .clamp(40.min(available_width), 80.min(available_width));

    let available_height = area.height.saturating_sub(2).max(1);
    let height = line_count
        .saturating_add(4)
        .clamp(7.min(available_height), 24.min(available_height));

    centered_fixed_rect(width, height, area)
}
