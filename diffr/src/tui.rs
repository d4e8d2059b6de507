//! Terminal lifecycle management for diffr.
//!
//! The TUI renders to stderr so that stdout stays clean for shell pipelines
//! (`diffr | …`). Raw mode and the alternate screen are owned by a
//! [`TerminalGuard`]: dropping it restores the terminal, so an early `?`
//! return out of the event loop can never leave the shell in raw mode.

use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use tracing::debug;

/// CrosstermBackend over a buffered stderr writer.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Restores the terminal when dropped.
#[must_use = "the terminal is restored as soon as the guard is dropped"]
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_tui();
        debug!("terminal restored");
    }
}

/// Enables raw mode, enters the alternate screen and builds the `Terminal`.
///
/// Keep the returned guard alive for as long as the TUI runs.
pub fn init_tui() -> std::io::Result<(Tui, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard;
    let mut out = BufWriter::new(stderr());
    execute!(out, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(out))?;
    Ok((terminal, guard))
}

/// Leaves the alternate screen and raw mode. Idempotent.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Restores the terminal before the panic message prints.
///
/// Must be called **before** [`init_tui`]. Chains onto the previous hook.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Returns a flag that flips to `true` when the process receives SIGTERM.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to register the handler.
pub fn register_sigterm() -> std::io::Result<Arc<AtomicBool>> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term))?;
    Ok(term)
}
