//! Central application state for diffr.
//!
//! This module owns the selection state machine (commit → file → diff), the
//! cursor positions of both selection lists, the diff scroll offset, and the
//! clear-and-redraw flag. No ratatui rendering happens here: `app.rs` is pure
//! state read by the render module and mutated by the keybinding dispatcher.
//!
//! External commands are reached only through [`HistorySource`], so every
//! transition can be exercised without git or a terminal.

use diffr_core::{CommitEntry, HistorySource};
use ratatui::text::Line;
use ratatui::widgets::ListState;
use tracing::{debug, warn};

use crate::ui::ansi::{self, DiffPalette};

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Selection lists and diff receive keys (default).
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
}

/// Position in the two-step selection flow, derived from [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No commit chosen; the commit list is shown.
    AwaitingCommit,
    /// Commit chosen, no file (the commit changed nothing, or listing failed).
    AwaitingFile,
    /// Commit and file chosen; the diff pane is populated.
    ShowingDiff,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::AwaitingCommit => "COMMIT",
            Step::AwaitingFile => "FILE",
            Step::ShowingDiff => "DIFF",
        }
    }
}

/// The chosen commit hash and file path.
///
/// Fields are private so that a file can never be set without a hash:
/// `select_hash` always drops the file, `select_file` refuses without a hash.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    hash: Option<String>,
    file: Option<String>,
}

impl Selection {
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Sets the hash and invalidates any previously selected file.
    pub fn select_hash(&mut self, hash: String) {
        self.hash = Some(hash);
        self.file = None;
    }

    /// Sets the file. Returns `false` (and changes nothing) if no hash is set.
    pub fn select_file(&mut self, file: String) -> bool {
        if self.hash.is_none() {
            return false;
        }
        self.file = Some(file);
        true
    }

    pub fn clear(&mut self) {
        self.hash = None;
        self.file = None;
    }

    pub fn step(&self) -> Step {
        match (&self.hash, &self.file) {
            (None, _) => Step::AwaitingCommit,
            (Some(_), None) => Step::AwaitingFile,
            (Some(_), Some(_)) => Step::ShowingDiff,
        }
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    /// Current keybinding mode.
    pub mode: Mode,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    /// Commit log, fetched once at startup and never refetched.
    pub commits: Vec<CommitEntry>,
    selection: Selection,
    /// Files changed by the selected commit; empty when no commit is selected.
    pub files: Vec<String>,
    /// Why the file list could not be produced, if it failed.
    pub file_error: Option<String>,

    /// Styled diff lines for the selected (commit, file) pair.
    pub diff_lines: Vec<Line<'static>>,
    /// Why the diff could not be produced, if it failed.
    pub diff_error: Option<String>,
    /// Transient status-bar message (e.g. pager fallback).
    pub notice: Option<String>,

    /// Cursor of the commit list.
    pub commit_list_state: ListState,
    /// Cursor of the file list.
    pub file_list_state: ListState,

    /// First visible line of the diff pane.
    pub diff_scroll: usize,
    /// Inner height of the diff pane after borders, cached after each render.
    pub diff_viewport_height: u16,
    /// Maximum rows shown by either selection list.
    pub visible_rows: u16,

    pager_configured: bool,
    palette: DiffPalette,
    clear_requested: bool,
}

impl AppState {
    /// Builds the initial state: commit list shown, cursor on the newest commit.
    pub fn new(
        commits: Vec<CommitEntry>,
        visible_rows: u16,
        pager_configured: bool,
        palette: DiffPalette,
    ) -> Self {
        let mut commit_list_state = ListState::default();
        if !commits.is_empty() {
            commit_list_state.select(Some(0));
        }
        Self {
            mode: Mode::default(),
            help_scroll: 0,
            commits,
            selection: Selection::default(),
            files: Vec::new(),
            file_error: None,
            diff_lines: Vec::new(),
            diff_error: None,
            notice: None,
            commit_list_state,
            file_list_state: ListState::default(),
            diff_scroll: 0,
            diff_viewport_height: 0,
            visible_rows: visible_rows.max(1),
            pager_configured,
            palette,
            clear_requested: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn step(&self) -> Step {
        self.selection.step()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Chooses a commit: lists its files and auto-selects the first one.
    ///
    /// Any file list, file and diff derived from a previous commit are
    /// dropped before the new list is fetched.
    pub fn select_commit(&mut self, source: &dyn HistorySource, hash: &str) {
        debug!(hash, "commit selected");
        self.selection.select_hash(hash.to_owned());
        self.files.clear();
        self.file_error = None;
        self.file_list_state = ListState::default();
        self.reset_diff();

        match source.changed_files(hash) {
            Ok(files) => self.files = files,
            Err(e) => {
                warn!(hash, error = %e, "listing changed files failed");
                self.file_error = Some(e.to_string());
            }
        }

        if let Some(first) = self.files.first().cloned() {
            self.file_list_state.select(Some(0));
            self.selection.select_file(first);
            self.load_diff(source);
        }
        self.request_clear();
    }

    /// Chooses a file of the current commit, overriding the default.
    ///
    /// Ignored when no commit is selected.
    pub fn select_file(&mut self, source: &dyn HistorySource, file: &str) {
        if !self.selection.select_file(file.to_owned()) {
            return;
        }
        debug!(file, "file selected");
        if let Some(idx) = self.files.iter().position(|f| f == file) {
            self.file_list_state.select(Some(idx));
        }
        self.load_diff(source);
        self.request_clear();
    }

    /// Escape: drops both selections and returns to the commit list.
    ///
    /// Always a full reset, whatever step the user was on.
    pub fn cancel(&mut self) {
        debug!("selection cancelled");
        self.selection.clear();
        self.files.clear();
        self.file_error = None;
        self.file_list_state = ListState::default();
        self.reset_diff();
        self.commit_list_state
            .select(if self.commits.is_empty() { None } else { Some(0) });
        self.request_clear();
    }

    /// Enter: chooses the highlighted row of whichever list is shown.
    pub fn choose_highlighted(&mut self, source: &dyn HistorySource) {
        match self.step() {
            Step::AwaitingCommit => {
                let hash = self
                    .commit_list_state
                    .selected()
                    .and_then(|i| self.commits.get(i))
                    .map(|c| c.hash.clone());
                if let Some(hash) = hash {
                    self.select_commit(source, &hash);
                }
            }
            Step::AwaitingFile | Step::ShowingDiff => {
                let file = self.file_list_state.selected().and_then(|i| self.files.get(i)).cloned();
                if let Some(file) = file {
                    self.select_file(source, &file);
                }
            }
        }
    }

    fn load_diff(&mut self, source: &dyn HistorySource) {
        self.reset_diff();
        let (Some(hash), Some(file)) = (self.selection.hash(), self.selection.file()) else {
            return;
        };
        match source.diff(hash, file) {
            Ok(diff) if diff.paged => self.diff_lines = ansi::text_to_lines(&diff.text),
            Ok(diff) => {
                if self.pager_configured {
                    self.notice = Some("pager not found; showing raw diff".to_owned());
                }
                self.diff_lines = ansi::plain_diff_lines(&diff.text, &self.palette);
            }
            Err(e) => {
                warn!(error = %e, "rendering diff failed");
                self.diff_error = Some(e.to_string());
            }
        }
    }

    fn reset_diff(&mut self) {
        self.diff_lines.clear();
        self.diff_error = None;
        self.diff_scroll = 0;
        self.notice = None;
    }

    // -----------------------------------------------------------------------
    // Clear-and-redraw
    // -----------------------------------------------------------------------

    fn request_clear(&mut self) {
        self.clear_requested = true;
    }

    /// Returns whether a transition asked for the screen to be cleared, and
    /// resets the request. Called by the event loop right before drawing.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }

    // -----------------------------------------------------------------------
    // List cursor
    // -----------------------------------------------------------------------

    /// The list that currently receives cursor keys, with its length.
    fn active_list(&mut self) -> (&mut ListState, usize) {
        match self.selection.step() {
            Step::AwaitingCommit => (&mut self.commit_list_state, self.commits.len()),
            Step::AwaitingFile | Step::ShowingDiff => {
                (&mut self.file_list_state, self.files.len())
            }
        }
    }

    /// Moves the list cursor down by `rows`, stopping at the last row.
    pub fn cursor_down(&mut self, rows: usize) {
        let (list, len) = self.active_list();
        if len == 0 {
            return;
        }
        let next = list.selected().map_or(0, |i| i.saturating_add(rows)).min(len - 1);
        list.select(Some(next));
    }

    /// Moves the list cursor up by `rows`, stopping at the first row.
    pub fn cursor_up(&mut self, rows: usize) {
        let (list, len) = self.active_list();
        if len == 0 {
            return;
        }
        let next = list.selected().map_or(0, |i| i.saturating_sub(rows));
        list.select(Some(next));
    }

    pub fn cursor_first(&mut self) {
        let (list, len) = self.active_list();
        if len > 0 {
            list.select(Some(0));
        }
    }

    pub fn cursor_last(&mut self) {
        let (list, len) = self.active_list();
        if len > 0 {
            list.select(Some(len - 1));
        }
    }

    // -----------------------------------------------------------------------
    // Diff scrolling
    // -----------------------------------------------------------------------

    fn max_diff_scroll(&self) -> usize {
        self.diff_lines.len().saturating_sub(1)
    }

    pub fn scroll_diff_down(&mut self, lines: usize) {
        self.diff_scroll = self.diff_scroll.saturating_add(lines).min(self.max_diff_scroll());
    }

    pub fn scroll_diff_up(&mut self, lines: usize) {
        self.diff_scroll = self.diff_scroll.saturating_sub(lines);
    }

    /// Scrolls by half the visible height; at least one line before the first render.
    pub fn half_page_down(&mut self) {
        self.scroll_diff_down(usize::from(self.diff_viewport_height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_diff_up(usize::from(self.diff_viewport_height / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_diff_down(usize::from(self.diff_viewport_height).max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_diff_up(usize::from(self.diff_viewport_height).max(1));
    }
}
