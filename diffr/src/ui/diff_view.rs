//! Diff panel renderer for diffr.
//!
//! Renders the diff pane using a List widget with manual virtual scrolling.
//! Only `lines[diff_scroll..diff_scroll + viewport_height]` are materialised
//! per frame, so rendering is O(viewport) rather than O(total lines).

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{BorderType, List, ListItem, Paragraph, Wrap},
};

use crate::app::{AppState, Step};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the diff pane, or a placeholder when there is nothing to show.
pub fn render_diff(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = match state.selection().file() {
        Some(file) => format!("Diff: {file}"),
        None => "Diff".to_owned(),
    };
    let is_active = state.step() == Step::ShowingDiff;
    let block = panel_block(title, BorderType::Rounded, is_active, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.diff_lines.is_empty() {
        let (msg, style) = match (&state.diff_error, state.step()) {
            (Some(err), _) => (format!("Could not render diff: {err}"), Style::default().fg(theme.error)),
            (None, Step::ShowingDiff) => ("(no differences)".to_owned(), Style::default().fg(theme.muted)),
            (None, _) => (
                "Select a hash and file to view the diff".to_owned(),
                Style::default().fg(theme.muted),
            ),
        };
        frame.render_widget(
            Paragraph::new(Line::styled(msg, style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let total = state.diff_lines.len();
    let visible_start = state.diff_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + inner.height as usize).min(total);

    let items: Vec<ListItem> = state.diff_lines[visible_start..visible_end]
        .iter()
        .map(|l| ListItem::new(l.clone()))
        .collect();
    frame.render_widget(List::new(items), inner);
}
