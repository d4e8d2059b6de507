//! UI rendering module for diffr.
//!
//! Module root for `ui/`. `render()` is the single entry point called by the
//! event loop's `terminal.draw()` closure.
//!
//! Layout arithmetic lives in `layout.rs`, the selection lists in
//! `selector.rs`, the diff pane in `diff_view.rs`, and pager-output parsing in
//! `ansi.rs`.

mod layout;
pub mod ansi;
pub mod diff_view;
pub mod help;
pub mod keybindings;
pub mod selector;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_header, render_status_bar};

/// Renders one complete frame: header, selector, diff pane, status bar and,
/// when open, the help overlay.
///
/// The diff pane's inner height is written back into `state` so that page
/// scrolling triggered by the next keypress uses the current size.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let layout = compute_layout(frame.area(), state.visible_rows);
    state.diff_viewport_height = inner_rect(layout.diff).height;

    render_header(frame, layout.header, theme);
    selector::render_selector(frame, layout.selector, state, theme);
    diff_view::render_diff(frame, layout.diff, state, theme);
    render_status_bar(frame, layout.status_bar, state, theme);

    // Drawn last so it sits on top.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::tests::{FakeSource, source, state};

    fn draw(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
        let theme = Theme::dark();
        terminal.draw(|f| render(f, state, &theme)).expect("draw");

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn first_frame_shows_commit_prompt_and_placeholder() {
        let mut state = state();
        let screen = draw(&mut state);

        assert!(screen.contains("Welcome to diffr"));
        assert!(screen.contains("Choose a commit hash:"));
        assert!(screen.contains("abc123 - Fix bug"));
        assert!(screen.contains("def456 - Add feature"));
        assert!(screen.contains("Select a hash and file to view the diff"));
        assert_eq!(state.diff_viewport_height, 25);
    }

    #[test]
    fn chosen_commit_shows_files_and_diff() {
        let src = source();
        let mut state = state();
        state.select_commit(&src, "abc123");
        let screen = draw(&mut state);

        assert!(screen.contains("Choose a file:"));
        assert!(screen.contains("README.md"));
        assert!(screen.contains("diff abc123 src/app.tsx"));
        assert!(!screen.contains("Choose a commit hash:"));
    }

    #[test]
    fn empty_commit_shows_go_back_message() {
        let src = source();
        let mut state = state();
        state.select_commit(&src, "def456");
        let screen = draw(&mut state);

        assert!(screen.contains("No files changed."));
        assert!(screen.contains("Press <ESC> to go back"));
        assert!(screen.contains("Select a hash and file to view the diff"));
    }

    #[test]
    fn failed_file_listing_is_not_shown_as_empty() {
        let src = FakeSource { failing_hashes: vec!["abc123".to_owned()], ..source() };
        let mut state = state();
        state.select_commit(&src, "abc123");
        let screen = draw(&mut state);

        assert!(screen.contains("Could not list changed files:"));
        assert!(!screen.contains("No files changed"));
    }

    #[test]
    fn failed_diff_is_shown_in_the_diff_pane() {
        let src = FakeSource { failing_diffs: vec!["src/app.tsx".to_owned()], ..source() };
        let mut state = state();
        state.select_commit(&src, "abc123");
        let screen = draw(&mut state);

        assert!(screen.contains("Could not render diff:"));
        assert!(!screen.contains("(no differences)"));
    }

    #[test]
    fn commit_list_is_limited_to_visible_rows() {
        let commits = (0..30)
            .map(|i| diffr_core::CommitEntry::new(format!("h{i:05}"), format!("commit {i}")))
            .collect();
        let palette = ansi::DiffPalette::from(&Theme::dark());
        let mut state = AppState::new(commits, 5, true, palette);
        let screen = draw(&mut state);

        assert!(screen.contains("h00004 - commit 4"));
        assert!(!screen.contains("h00005 - commit 5"));
    }

    #[test]
    fn empty_history_says_so() {
        let palette = ansi::DiffPalette::from(&Theme::dark());
        let mut state = AppState::new(Vec::new(), 10, true, palette);
        let screen = draw(&mut state);

        assert!(screen.contains("This repository has no commits yet."));
        assert!(!screen.contains("Choose a commit hash:"));
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let mut state = state();
        state.mode = Mode::HelpOverlay;
        let screen = draw(&mut state);
        assert!(screen.contains("Choose the highlighted commit or file"));
    }
}
