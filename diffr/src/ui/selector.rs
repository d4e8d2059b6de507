//! Selection panel renderer for diffr.
//!
//! Shows exactly one of: the commit list, the changed-file list of the chosen
//! commit, or a message when that list is empty or could not be produced.
//! Lists are rendered with `render_stateful_widget` so the `ListState`
//! cursor highlight and scrolling are applied.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BorderType, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{AppState, Step};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the left (or top) selection panel for the current step.
pub fn render_selector(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    if state.step() == Step::AwaitingCommit && state.commits.is_empty() {
        let block = panel_block("Commits (0)", BorderType::Plain, true, theme);
        let lines = vec![
            Line::raw("This repository has no commits yet."),
            Line::styled("Press q to quit", Style::default().fg(theme.muted)),
        ];
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    } else if state.step() == Step::AwaitingCommit {
        let items: Vec<ListItem> = state
            .commits
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(c.hash.clone(), Style::default().fg(theme.commit_hash)),
                    Span::raw(" - "),
                    Span::raw(c.message.clone()),
                ]))
            })
            .collect();
        let title = format!("Commits ({})", state.commits.len());
        render_list(
            frame,
            area,
            &title,
            "Choose a commit hash:",
            items,
            &mut state.commit_list_state,
            theme,
        );
    } else if !state.files.is_empty() {
        let items: Vec<ListItem> =
            state.files.iter().map(|f| ListItem::new(Line::raw(f.clone()))).collect();
        let title = format!("Files ({})", state.files.len());
        render_list(frame, area, &title, "Choose a file:", items, &mut state.file_list_state, theme);
    } else {
        render_empty_files(frame, area, state, theme);
    }
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    prompt: &str,
    items: Vec<ListItem>,
    list_state: &mut ListState,
    theme: &Theme,
) {
    frame.render_widget(panel_block(title, BorderType::Plain, true, theme), area);

    let [prompt_area, list_area] = inner_rect(area)
        .layout(&Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]));
    frame.render_widget(
        Paragraph::new(Line::styled(prompt, Style::default().fg(theme.prompt))),
        prompt_area,
    );

    let list = List::new(items)
        .highlight_style(Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD))
        .highlight_symbol("❯ ");
    frame.render_stateful_widget(list, list_area, list_state);
}

/// The chosen commit has no files to offer: either it changed nothing, or
/// listing failed. The two cases get different messages.
fn render_empty_files(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = match &state.file_error {
        Some(err) => vec![
            Line::styled("Could not list changed files:", Style::default().fg(theme.error)),
            Line::styled(err.clone(), Style::default().fg(theme.error)),
            Line::styled("Press <ESC> to go back", Style::default().fg(theme.muted)),
        ],
        None => vec![
            Line::raw("No files changed."),
            Line::styled("Press <ESC> to go back", Style::default().fg(theme.muted)),
        ],
    };
    let block = panel_block("Files", BorderType::Plain, true, theme);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
