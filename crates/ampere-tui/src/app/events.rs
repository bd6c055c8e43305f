//! Event handling for the TUI

use std::time::Duration;

use ampere_core::StoreEvent;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Bracketed paste (also what most keyboard-mode QR scanners produce)
    Paste(String),
    /// Background work finished in a store
    Store(StoreEvent),
    /// Terminal tick (for animations)
    Tick,
}

/// Merges terminal input with store completions
pub struct EventHandler {
    /// Sender handed to stores
    sender: mpsc::UnboundedSender<StoreEvent>,
    /// Receiver drained on the UI thread
    receiver: mpsc::UnboundedReceiver<StoreEvent>,
    /// Tick rate for animations
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Get a clone of the sender for stores to report completions
    pub fn sender(&self) -> mpsc::UnboundedSender<StoreEvent> {
        self.sender.clone()
    }

    /// Try to receive the next store event (non-blocking)
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        self.receiver.try_recv().ok()
    }

    /// Next event: pending store events first, then terminal input, else a tick
    pub fn next(&mut self) -> std::io::Result<Event> {
        if let Some(event) = self.try_recv() {
            return Ok(Event::Store(event));
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Paste(text) => return Ok(Event::Paste(text)),
                _ => {}
            }
        }

        Ok(Event::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_events_are_delivered() {
        let mut handler = EventHandler::new(Duration::from_millis(10));
        let sender = handler.sender();
        assert!(handler.try_recv().is_none());

        sender
            .send(StoreEvent::PayReqDecoded {
                payment_request: "lnbc1".to_string(),
                result: Err("bad".to_string()),
            })
            .unwrap();

        assert!(matches!(
            handler.try_recv(),
            Some(StoreEvent::PayReqDecoded { .. })
        ));
    }
}
