//! Activity log panel: newest poll and submission events first.

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::events::{Event, EventType, Worker};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn status_icon(event: &Event) -> &'static str {
    match (event.event_type, event.log_level) {
        (EventType::Success, _) => "✅",
        // Warn-level errors are routine (a feed missed one refresh)
        (EventType::Error, LogLevel::Warn) => "⚠️",
        (EventType::Error, _) => "❌",
        (EventType::Refresh, _) => "🔄",
        (EventType::Waiting, _) => "⏳",
    }
}

fn source_label(worker: &Worker) -> String {
    match worker {
        Worker::Poller(feed) => format!("[{}]", feed),
        Worker::Submitter => "[submit]".to_string(),
    }
}

fn log_line(event: &Event) -> Line<'static> {
    let color = get_worker_color(&event.worker);
    Line::from(vec![
        Span::raw(format!("{} ", status_icon(event))),
        Span::styled(
            format!("{} ", format_compact_timestamp(&event.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{} ", source_label(&event.worker)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(clean_http_error_message(&event.msg), Style::default().fg(color)),
    ])
}

pub fn render_logs_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Borders plus padding take three rows
    let capacity = (area.height.saturating_sub(3) as usize).max(1);

    let lines: Vec<Line> = state
        .activity_logs
        .iter()
        .rev()
        .take(capacity)
        .map(log_line)
        .collect();

    let paragraph = if lines.is_empty() {
        Paragraph::new(Line::from("Waiting for the first refresh..."))
    } else {
        Paragraph::new(lines)
    };

    let block = Block::default()
        .title(format!("ACTIVITY LOG ({})", state.activity_logs.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}
