#![forbid(unsafe_code)]

//! Terminal session management.
//!
//! Owns the terminal mode for the lifetime of the app: raw mode, alternate
//! screen, hidden cursor, optional mouse capture. Restoration happens in
//! `Drop` so any exit path — including panics unwinding through `main` —
//! leaves the terminal usable.

use std::io::{self, Write};

use crossterm::{cursor, event, execute, terminal};
use tokenlens_core::event::Event;

/// RAII guard over the terminal state.
#[derive(Debug)]
pub struct TerminalSession {
    mouse: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, optionally capturing mouse
    /// events.
    pub fn new(mouse: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        if mouse {
            execute!(out, event::EnableMouseCapture)?;
        }
        Ok(Self { mouse })
    }

    /// Current terminal size in (columns, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Block until the next routable input event.
    ///
    /// Events the app does not handle (focus, paste, key releases) are
    /// swallowed here so the caller's loop only wakes for real input.
    pub fn next_event(&self) -> io::Result<Event> {
        loop {
            if let Some(converted) = Event::from_crossterm(event::read()?) {
                return Ok(converted);
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Best effort: restoration failures have nowhere to go.
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, event::DisableMouseCapture);
        }
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}
