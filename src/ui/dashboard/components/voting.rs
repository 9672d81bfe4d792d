//! Voting panel
//!
//! Account picker and banner while the session is open, final counters once
//! every account has voted.

use super::super::utils::get_banner_color;
use crate::view::{DashboardView, EXHAUSTED_MESSAGE, RESET_PROMPT, ViewMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

pub fn render_voting_panel(f: &mut Frame, area: Rect, view: &DashboardView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    match view.mode {
        ViewMode::Active => render_account_picker(f, chunks[0], view),
        ViewMode::Finished { voted, total } => render_finished(f, chunks[0], voted, total),
    }
    render_banner(f, chunks[1], view);
}

fn render_account_picker(f: &mut Frame, area: Rect, view: &DashboardView) {
    let mut lines: Vec<Line> = Vec::new();

    if view.accounts.is_empty() {
        lines.push(Line::from(Span::styled(
            "Loading accounts...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for option in &view.accounts {
        let is_selected = view.selected.as_deref() == Some(option.address.as_str());
        let marker = if is_selected { "▶ " } else { "  " };
        let style = match (is_selected, option.selectable) {
            (true, _) => Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, option.label),
            style,
        )));
    }

    if view.exhausted {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            EXHAUSTED_MESSAGE,
            Style::default().fg(Color::LightYellow),
        )));
    }

    let hint_style = if view.controls_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Y] Vote YES  [N] Vote NO  [↑/↓] Account  [R] Reset",
        hint_style,
    )));

    let block = Block::default()
        .title("CAST YOUR VOTE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_finished(f: &mut Frame, area: Rect, voted: u64, total: u64) {
    let lines = vec![
        Line::from(Span::styled(
            "Voting complete",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Votes cast: {}", voted)),
        Line::from(format!("Total accounts: {}", total)),
        Line::from(""),
        Line::from(Span::styled(
            "[R] Reset voting",
            Style::default().fg(Color::Cyan),
        )),
    ];

    let block = Block::default()
        .title("SESSION FINISHED")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightGreen));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_banner(f: &mut Frame, area: Rect, view: &DashboardView) {
    let Some(banner) = &view.banner else {
        return;
    };
    let color = get_banner_color(banner.kind);
    let paragraph = Paragraph::new(banner.text.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, area);
}

/// Modal confirmation for a session reset, drawn over the whole dashboard.
pub fn render_reset_prompt(f: &mut Frame, area: Rect) {
    let popup = centered(area, 60, 7);
    let lines = vec![
        Line::from(RESET_PROMPT),
        Line::from(""),
        Line::from(Span::styled(
            "[Y] Yes, reset   [N] Cancel",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default()
        .title("CONFIRM RESET")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightRed));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
