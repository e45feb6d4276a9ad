//! Event handling for the interactive UI

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::error::Result;

/// Event handler for keyboard input
pub struct EventHandler {
    /// Timeout for polling events; also bounds how late a banner can hide
    timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(100),
        }
    }

    /// Get the next key press, if one arrives before the poll timeout
    pub fn next(&self) -> Result<Option<KeyEvent>> {
        if event::poll(self.timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
