//! diffr — browse git history one commit and one file at a time.
//!
//! Entry point for the `diffr` binary. Wires together the command line
//! (`cli`), file logging (`logging`), user config (`config`), the terminal
//! lifecycle (`tui`), the event bus (`event`), the selection state (`app`) and
//! rendering (`ui`). Git and the pager are reached through `diffr-core`.
//!
//! # Startup sequence
//!
//! 1. Parse flags, install logging, load config and theme.
//! 2. Discover the repository and load the commit log. Failures here are
//!    fatal and bubble out of `main` before the terminal is touched.
//! 3. `install_panic_hook()` so the terminal is restored before a panic prints.
//! 4. `register_sigterm()`, polled in the event loop.
//! 5. `init_tui()` and `spawn_event_task()`.
//!
//! The terminal guard returned by `init_tui()` restores the terminal when
//! `main` returns, whether the loop ended normally or a draw failed.

mod app;
mod cli;
mod config;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use clap::Parser;
use diffr_core::{GitCli, HistorySource};
use tracing::{debug, info};

use crate::ui::ansi::DiffPalette;
use crate::ui::keybindings::{self, KeyAction};

#[tokio::main]
async fn main() -> Result<(), diffr_core::Error> {
    let cli = cli::Cli::parse();
    if let Some(path) = logging::init_logging()? {
        debug!(path = %path.display(), "logging to file");
    }

    let config = config::Config::load().merge_cli(&cli);
    let theme = theme::Theme::from_name(&config.theme);
    let pager = config.pager_command();

    let source = GitCli::discover(&cli.repo, pager)?;
    let commits = source.commits()?;
    info!(
        name = ?cli.name,
        workdir = %source.workdir().display(),
        commits = commits.len(),
        "diffr starting"
    );

    let mut state = app::AppState::new(
        commits,
        config.visible_rows,
        source.pager().is_some(),
        DiffPalette::from(&theme),
    );

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let (mut terminal, _guard) = tui::init_tui()?;

    let event::EventHandler { tx, mut rx, render_pending } = event::EventHandler::new();
    event::spawn_event_task(tx, Arc::clone(&render_pending));

    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when idle.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        event::render_done(&render_pending);
                        if state.take_clear_request() {
                            terminal.clear()?;
                        }
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        // Selections run git and the pager synchronously.
                        let action = tokio::task::block_in_place(|| {
                            keybindings::handle_key(key, &mut state, &source)
                        });
                        if action == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    // ratatui picks up the new size from `frame.area()` on the next draw.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    info!("diffr exiting");
    Ok(())
}
