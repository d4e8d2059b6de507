//! Event bus for diffr.
//!
//! Terminal input and render ticks are normalised into a single `AppEvent`
//! enum and sent over a tokio unbounded MPSC channel. The main loop receives
//! from this channel and dispatches accordingly.
//!
//! The render interval (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! At most one `Render` is in flight: the task skips ticks until the main loop
//! acknowledges the last one, so a slow git or pager run leaves a single
//! redraw behind instead of a backlog.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Render tick — triggers a `terminal.draw()` call.
    Render,
    /// The terminal input stream ended.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half — handed to the background event task.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half — owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Set while a `Render` sits in the channel; cleared by [`render_done`].
    pub render_pending: Arc<AtomicBool>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, render_pending: Arc::new(AtomicBool::new(false)) }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Called by the main loop when it picks up a `Render`, re-arming the tick.
pub fn render_done(pending: &AtomicBool) {
    pending.store(false, Ordering::Release);
}

/// Sends a `Render` unless one is still waiting to be drawn.
///
/// Returns `false` once the receiver is gone.
fn queue_render(tx: &mpsc::UnboundedSender<AppEvent>, pending: &AtomicBool) -> bool {
    if pending.swap(true, Ordering::AcqRel) {
        return !tx.is_closed();
    }
    tx.send(AppEvent::Render).is_ok()
}

/// Spawns the background tokio task that drives the unified event channel.
///
/// - `reader.next().fuse()` keeps `tokio::select!` from polling a completed
///   future if the crossterm stream terminates.
/// - Only `KeyEventKind::Press` is forwarded; Windows also reports releases.
/// - The task exits once the receiver is dropped.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>, render_pending: Arc<AtomicBool>) {
    tokio::spawn(async move {
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let keep_going = tokio::select! {
                _ = render_tick => queue_render(&tx, &render_pending),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key)).is_ok()
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)).is_ok(),
                    Some(Ok(_)) => true,
                    Some(Err(_)) | None => {
                        let _ = tx.send(AppEvent::Quit);
                        false
                    }
                },
            };
            if !keep_going {
                break;
            }
        }
    });
}
