//! Tally panel
//!
//! Two gauges, one per choice, sized by their share of the votes cast

use crate::view::{BarView, TallyView};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge};

pub fn render_tally_panel(f: &mut Frame, area: Rect, tally: &TallyView) {
    let block = Block::default()
        .title(format!("RESULTS ({} votes)", tally.total_votes))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(inner);

    f.render_widget(
        choice_gauge(format!("YES: {}", tally.yes_votes), &tally.yes, Color::LightGreen),
        rows[0],
    );
    f.render_widget(
        choice_gauge(format!("NO: {}", tally.no_votes), &tally.no, Color::LightRed),
        rows[1],
    );
}

fn choice_gauge(title: String, bar: &BarView, color: Color) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().title(title))
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .ratio((bar.width / 100.0).clamp(0.0, 1.0))
        .label(bar.label.clone())
}
