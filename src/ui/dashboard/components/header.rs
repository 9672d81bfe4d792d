//! Dashboard header component
//!
//! Renders the title and the ledger connectivity line

use super::super::state::DashboardState;
use super::super::utils::format_uptime;
use crate::view::{Connectivity, DashboardView};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_header(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    view: &DashboardView,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!(
        "VOTECHAIN DASHBOARD v{}",
        env!("CARGO_PKG_VERSION")
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let (status_text, status_color) = match &view.connectivity {
        Connectivity::Unknown => ("● Connecting...".to_string(), Color::Gray),
        Connectivity::Connected {
            contract_short,
            block_number,
            ..
        } => (
            format!(
                "● Connected | Contract: {} | Block: {}",
                contract_short, block_number
            ),
            Color::LightGreen,
        ),
        Connectivity::Disconnected => ("● Disconnected".to_string(), Color::LightRed),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::styled(
            format!(
                "  |  {}  |  Uptime: {}",
                state.environment.ledger_url(),
                format_uptime(state.start_time.elapsed())
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, header_chunks[1]);
}
