//! Main UI rendering logic

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode};
use super::form::FormField;
use super::utils::{get_banner_style, get_row_style, truncate_str};
use crate::board::SignupFields;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(3), // Banner
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);

    match app.mode {
        AppMode::Help => render_help(f, chunks[1]),
        _ => render_main_content(f, app, chunks[1]),
    }

    render_banner(f, app, chunks[2], Instant::now());
    render_footer(f, app, chunks[3]);

    if let AppMode::ConfirmUnregister(action) = &app.mode {
        render_confirm(f, &action.confirmation_prompt(), size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let loaded = app
        .last_loaded
        .map(|t| format!("updated {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "not loaded".to_string());
    let title = format!(" Extracurricular Activities - {} - {} ", app.base_url, loaded);
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_activities(f, app, chunks[0]);
    render_form(f, app, chunks[1]);
}

/// Render the activity cards from the latest view
fn render_activities(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let focused = app.mode == AppMode::Normal;

    let items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .map(|row| {
            let indent = match row.control {
                Some(_) => "  ",
                None => "",
            };
            let mut spans = vec![Span::styled(
                truncate_str(&format!("{}{}", indent, row.text), width.saturating_sub(4)),
                get_row_style(row.kind),
            )];
            if row.control.is_some() {
                spans.push(Span::styled(" [x]", Style::default().fg(Color::Red)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Available Activities ")
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_row));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Render the signup form
fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.mode == AppMode::Signup;
    let options = &app.board.view().options;

    let mut lines = vec![
        Line::from(Span::styled(
            "Tab: Next field | ←→: Pick activity | Enter: Sign up | Esc: Back",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for field in FormField::all() {
        let is_current = focused && app.form.current_field == field;
        let label_style = if is_current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let value_style = if is_current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = match field {
            FormField::Email => {
                let email = app.form.email();
                if is_current {
                    let mut display = email;
                    let cursor = app.form.email.cursor();
                    let byte_pos = display
                        .char_indices()
                        .nth(cursor)
                        .map(|(i, _)| i)
                        .unwrap_or(display.len());
                    display.insert(byte_pos, '█');
                    display
                } else if email.is_empty() {
                    "your-email@mergington.edu".to_string()
                } else {
                    email
                }
            }
            FormField::Activity => format!("< {} >", app.form.activity_label(options)),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:14}", field.label()), label_style),
            Span::raw(": "),
            Span::styled(value, value_style),
        ]));
    }

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sign Up for an Activity ")
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("  ↑/↓ or k/j    Move through the activity list"),
        Line::from("  PgUp/PgDn     Jump between activities"),
        Line::from("  Enter/d/Del   Unregister the selected participant"),
        Line::from("  s or Tab      Focus the signup form"),
        Line::from("  r             Reload activities"),
        Line::from("  q             Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to return...",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(paragraph, area);
}

/// Render the feedback banner; empty once the message has expired
fn render_banner(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let line = match app.board.banner().visible_at(now) {
        Some((kind, text)) => {
            let style = get_banner_style(kind);
            Line::from(vec![
                Span::styled(format!("{} ", kind.icon()), style),
                Span::styled(text.to_string(), style),
            ])
        }
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.mode {
        AppMode::Normal => "[↑↓] Rows  [Enter] Unregister  [s]ign up  [r]eload  [?] help  [q]uit",
        AppMode::Signup => "[Tab] Next field  [←→] Activity  [Enter] Sign up  [Esc] Back",
        AppMode::ConfirmUnregister(_) => "[y] Confirm  [any other key] Cancel",
        AppMode::Help => "Press any key to return",
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(footer, area);
}

/// Centered yes/no popup
fn render_confirm(f: &mut Frame, prompt: &str, area: Rect) {
    let popup_width = (prompt.chars().count() as u16 + 6).max(30).min(area.width);
    let popup_height = 5u16.min(area.height);
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    let text = vec![
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("(y/N)", Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}
