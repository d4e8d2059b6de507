//! Layout engine for diffr.
//!
//! Pure layout arithmetic, recomputed inside `terminal.draw()` on every frame
//! so the panels always reflect the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 80` columns the selector (40 %) and the diff pane (60 %) sit side by
//! side. Narrower terminals stack the selector above the diff pane. In both
//! cases the selector is only as tall as `visible_rows` list rows plus its
//! prompt line and borders.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::AppState;
use crate::theme::Theme;

/// Width below which the panels are stacked instead of side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;

/// Panel rectangles for one frame. Never store these across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub selector: Rect,
    pub diff: Rect,
    pub status_bar: Rect,
}

/// Splits `area` into header, selector, diff pane and status bar.
pub fn compute_layout(area: Rect, visible_rows: u16) -> AppLayout {
    let [header, _, main_area, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    // List rows + prompt line + top and bottom border.
    let selector_height = visible_rows.saturating_add(3);

    let (selector, diff) = if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let [left, right] = main_area.layout(&Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ]));
        let [selector, _] = left.layout(&Layout::vertical([
            Constraint::Length(selector_height),
            Constraint::Fill(1),
        ]));
        (selector, right)
    } else {
        let [top, bottom] = main_area.layout(&Layout::vertical([
            Constraint::Length(selector_height),
            Constraint::Fill(1),
        ]));
        (top, bottom)
    };

    AppLayout { header, selector, diff, status_bar }
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// The active panel (the one receiving list keys) gets the `border_active`
/// color; `border_type` lets the diff pane keep its rounded frame.
pub fn panel_block<'a>(
    title: impl Into<Line<'a>>,
    border_type: BorderType,
    is_active: bool,
    theme: &Theme,
) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// Renders the title bar on the first row.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Span::styled(
        " Welcome to diffr ",
        Style::default()
            .bg(theme.header_bg)
            .fg(theme.header_fg)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(Line::from(vec![Span::raw("  "), title])), area);
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Shows the current step, the selected hash and file, any notice, and a
/// short key reminder. Never renders blank.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let step_span = Span::styled(
        format!(" {} ", state.step().label()),
        Style::default().fg(theme.status_step).add_modifier(Modifier::BOLD),
    );
    let mut spans = vec![step_span];

    let selection = state.selection();
    if let Some(hash) = selection.hash() {
        spans.push(Span::raw(format!(" {hash}")));
    }
    if let Some(file) = selection.file() {
        spans.push(Span::raw(format!(" › {file}")));
    }
    if let Some(notice) = &state.notice {
        spans.push(Span::styled(format!("  {notice}"), Style::default().fg(theme.error)));
    }
    spans.push(Span::raw("   ? help · esc back · q quit"));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_places_panels_side_by_side() {
        let layout = compute_layout(Rect::new(0, 0, 100, 40), 10);

        assert_eq!(layout.header, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.status_bar, Rect::new(0, 39, 100, 1));
        assert_eq!(layout.selector, Rect::new(0, 2, 40, 13));
        assert_eq!(layout.diff, Rect::new(40, 2, 60, 37));
    }

    #[test]
    fn narrow_terminal_stacks_panels() {
        let layout = compute_layout(Rect::new(0, 0, 60, 40), 10);

        assert_eq!(layout.selector, Rect::new(0, 2, 60, 13));
        assert_eq!(layout.diff, Rect::new(0, 15, 60, 24));
    }

    #[test]
    fn selector_never_exceeds_available_height() {
        let layout = compute_layout(Rect::new(0, 0, 100, 10), 50);
        assert!(layout.selector.bottom() <= layout.status_bar.y);
    }
}
