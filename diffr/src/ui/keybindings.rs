//! Keybinding dispatcher for diffr.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so that the help overlay and the
//! normal selection flow have isolated handler functions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use diffr_core::HistorySource;

use crate::app::{AppState, Mode};
use crate::ui::help;

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running and redraw.
    Continue,
    /// Tear down the terminal and exit.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// `source` is only consulted for selections (Enter), which re-run git and
/// the pager synchronously.
pub fn handle_key(key: KeyEvent, state: &mut AppState, source: &dyn HistorySource) -> KeyAction {
    // Release/repeat events arrive on some platforms; act on presses only.
    if key.kind == KeyEventKind::Release {
        return KeyAction::Continue;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state, source),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState, source: &dyn HistorySource) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.cursor_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.cursor_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.cursor_first(),
        KeyCode::Char('G') | KeyCode::End => state.cursor_last(),
        KeyCode::Enter => state.choose_highlighted(source),
        KeyCode::Esc => state.cancel(),
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// Diff pane scrolling: J / K and the Ctrl / page combos.
///
/// Returns `None` when the key is not a scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('J') => state.scroll_diff_down(1),
        KeyCode::Char('K') => state.scroll_diff_up(1),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        KeyCode::PageDown => state.full_page_down(),
        KeyCode::PageUp => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Any of `?`, `Esc`, or `q` dismisses the overlay; j/k/g/G scroll it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1).min(help::max_help_scroll());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = help::max_help_scroll(),
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}
