use crate::app::AppState;
use crate::utils::unicode::{display_width, truncate_to_width};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAV_HINT: &str = "? help  q quit";

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let version_text = format!("v{VERSION}");
    let right_width = display_width(NAV_HINT) + display_width(&version_text) + 2;
    let left_budget = (area.width as usize).saturating_sub(right_width + 1);
    let left_content = truncate_to_width(&left_text(state), left_budget);

    let padding = (area.width as usize)
        .saturating_sub(display_width(&left_content) + right_width);

    let status_line = format!(
        "{}{:padding$}{} {} ",
        left_content,
        "",
        NAV_HINT,
        version_text,
        padding = padding
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    f.render_widget(Paragraph::new(Line::from(vec![Span::styled(status_line, style)])), area);
}

/// Mode, current selection, then the transient status message if any.
fn left_text(state: &AppState) -> String {
    let selection = state.session.selection();
    let mut parts = vec![
        format!(" {}", state.mode),
        selection.platform.clone(),
    ];
    if let Some(pm) = &selection.package_manager {
        parts.push(pm.clone());
    }
    if let Some(fw) = &selection.framework {
        parts.push(fw.clone());
    }
    if let Some((message, _)) = &state.status_message {
        parts.push(message.clone());
    }
    parts.join(" | ")
}
