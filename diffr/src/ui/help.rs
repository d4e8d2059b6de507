//! Help overlay renderer for diffr.
//!
//! Draws a centred modal box over the panel layout. `Clear` erases the
//! background first, inside the same `terminal.draw()` closure as every other
//! panel, so no second draw call is needed.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Help body. Lines that do not start with a space are section headings.
const HELP_LINES: &[&str] = &[
    "Selection",
    "  j / k / ↓ / ↑     Move the list cursor",
    "  g / G / Home/End  Jump to first / last row",
    "  Enter             Choose the highlighted commit or file",
    "  Esc               Drop the selection, back to the commit list",
    "",
    "Diff",
    "  J / K             Scroll one line down / up",
    "  Ctrl-d / Ctrl-u   Scroll half a page down / up",
    "  Ctrl-f / Ctrl-b   Scroll a full page down / up",
    "  PgDn / PgUp       Scroll a full page down / up",
    "",
    "General",
    "  ?                 Open / close this help",
    "  q / Ctrl-c        Quit",
];

/// Largest useful `help_scroll`: the last line at the top of the box.
pub fn max_help_scroll() -> u16 {
    u16::try_from(HELP_LINES.len().saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Renders the help overlay, scrolled vertically by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns, where the modal would
/// collapse to an unusable width.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help (j/k scroll, ? or Esc to dismiss) ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll.min(max_help_scroll()), 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = Style::default().fg(theme.prompt).add_modifier(Modifier::BOLD);
    HELP_LINES
        .iter()
        .map(|&line| {
            if line.is_empty() || line.starts_with(' ') {
                Line::from(line)
            } else {
                Line::styled(line, heading)
            }
        })
        .collect::<Vec<_>>()
        .into()
}
