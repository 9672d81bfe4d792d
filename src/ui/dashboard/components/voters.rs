//! Voter list panel

use crate::view::VoterListView;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_voters_panel(f: &mut Frame, area: Rect, voters: &VoterListView) {
    let lines: Vec<Line> = match voters {
        VoterListView::Placeholder(text) => {
            vec![Line::styled(*text, Style::default().fg(Color::DarkGray))]
        }
        VoterListView::Entries(entries) => entries
            .iter()
            .map(|entry| Line::styled(entry.as_str(), Style::default().fg(Color::White)))
            .collect(),
    };

    let block = Block::default()
        .title("VOTERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
