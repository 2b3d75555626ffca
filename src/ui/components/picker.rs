use crate::app::{AppState, Section};
use crate::session::Slot;
use crate::utils::unicode::{display_width, truncate_to_width};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

pub const COPY_GLYPH: &str = "⧉";
pub const COPIED_GLYPH: &str = "✓";

pub fn render(f: &mut Frame, state: &AppState, area: Rect, now: Instant) {
    let sections = state.sections();
    let mut constraints: Vec<Constraint> = sections
        .iter()
        .map(|section| Constraint::Length(section_height(*section)))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, section) in sections.iter().enumerate() {
        render_section(f, state, *section, idx == state.focus, chunks[idx], now);
    }
}

fn section_height(section: Section) -> u16 {
    match section {
        Section::Platform | Section::PackageManager => 3,
        Section::Framework | Section::Library(_) => 4,
    }
}

fn section_slot(state: &AppState, section: Section) -> Option<Slot> {
    match section {
        Section::Platform | Section::PackageManager => None,
        Section::Framework => Some(state.session.framework_slot()),
        Section::Library(idx) => state
            .session
            .library_sections()
            .get(idx)
            .and_then(|library| library.slot()),
    }
}

fn render_section(
    f: &mut Frame,
    state: &AppState,
    section: Section,
    focused: bool,
    area: Rect,
    now: Instant,
) {
    let theme = &state.theme;
    let border_style = if focused {
        Style::default().fg(theme.focus_border)
    } else {
        Style::default().fg(theme.inactive)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", section.title(&state.session)))
        .border_style(border_style)
        .style(Style::default().bg(theme.background));

    let active = section.active_index(&state.session);
    let mut buttons = Vec::new();
    for (idx, label) in section.labels(&state.session).iter().enumerate() {
        let style = if focused && idx == state.cursor {
            Style::default()
                .fg(theme.cursor)
                .add_modifier(Modifier::REVERSED)
        } else if Some(idx) == active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        buttons.push(Span::styled(format!(" {label} "), style));
        buttons.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(buttons)];
    if let Some(slot) = section_slot(state, section) {
        let copied = state.is_copied(&slot.key, now);
        let inner_width = area.width.saturating_sub(2) as usize;
        let glyph_style = if copied {
            Style::default()
                .fg(theme.copied)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive)
        };
        lines.push(Line::from(vec![
            Span::styled(
                command_text(&slot.command, inner_width),
                Style::default().fg(theme.command),
            ),
            Span::styled(copy_glyph(copied), glyph_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn copy_glyph(copied: bool) -> &'static str {
    if copied { COPIED_GLYPH } else { COPY_GLYPH }
}

/// The `$ command ` prefix of a command box, cut to leave room for the glyph.
pub fn command_text(command: &str, width: usize) -> String {
    let text = if command.is_empty() {
        "$ ".to_string()
    } else {
        format!("$ {command} ")
    };
    let budget = width.saturating_sub(display_width(COPY_GLYPH));
    if display_width(&text) <= budget {
        text
    } else {
        format!("{} ", truncate_to_width(&text, budget.saturating_sub(1)))
    }
}
