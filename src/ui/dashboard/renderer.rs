//! Dashboard main renderer

use super::components::{footer, header, logs, tally, voters, voting};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;
use std::time::Instant;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let view = state.view(Instant::now());

    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state, &view);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Fill(1)])
        .split(content_chunks[0]);

    tally::render_tally_panel(f, left_chunks[0], &view.tally);
    voting::render_voting_panel(f, left_chunks[1], &view);
    voters::render_voters_panel(f, content_chunks[1], &view.voters);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3]);

    if view.confirm_reset {
        voting::render_reset_prompt(f, f.area());
    }
}
