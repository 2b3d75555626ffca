pub mod picker;
pub mod status_bar;

use crate::app::{AppState, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::Instant;

pub fn render(f: &mut Frame, state: &AppState, now: Instant) {
    let [picker_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());

    picker::render(f, state, picker_area, now);
    status_bar::render(f, state, status_area);

    if state.mode == Mode::Help {
        render_help_overlay(f, state);
    }
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let help_text = r#"
    cmdgen Help

      ←/→ or h/l            Move between buttons
      ↑/↓ or j/k            Move between rows
      Tab / Shift+Tab       Move between rows
      gg / G                First / last row
      Enter or Space        Select button
      y or c                Copy the focused command
      ?                     Toggle help
      q                     Quit

    Copying from the platform, package manager or
    framework row copies the framework command.
    "#;

    let area = centered_rect(60, 60, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(r);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    area
}
