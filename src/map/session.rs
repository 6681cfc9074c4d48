use crate::models::{LatLng, Marker};

use super::surface::PinId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    Editing { position: LatLng, pin: PinId },
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// Non-empty text was submitted.
    Committed(Marker),
    /// Empty text was submitted, or the input was closed.
    Cancelled,
}

/// The single slot for a marker being written.
///
/// Only the empty string cancels a submit; whitespace counts as text.
#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }
}

impl EditSession {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing { .. })
    }

    pub fn position(&self) -> Option<LatLng> {
        match self.state {
            SessionState::Editing { position, .. } => Some(position),
            SessionState::Idle => None,
        }
    }

    pub fn pin(&self) -> Option<PinId> {
        match self.state {
            SessionState::Editing { pin, .. } => Some(pin),
            SessionState::Idle => None,
        }
    }

    /// Starts editing at `position`, force-cancelling any live session.
    /// Returns the pin of the session that was displaced.
    pub fn start(&mut self, position: LatLng, pin: PinId) -> Option<PinId> {
        let displaced = self.pin();
        self.state = SessionState::Editing { position, pin };
        displaced
    }

    /// Ends the session with the submitted text. `None` when idle.
    pub fn submit(&mut self, text: &str) -> Option<(PinId, SessionEnd)> {
        let SessionState::Editing { position, pin } = self.state else {
            return None;
        };
        self.state = SessionState::Idle;
        let end = if text.is_empty() {
            SessionEnd::Cancelled
        } else {
            SessionEnd::Committed(Marker::new(position, text))
        };
        Some((pin, end))
    }

    /// Ends the session without submitting.
    pub fn close(&mut self) -> Option<PinId> {
        let pin = self.pin();
        self.state = SessionState::Idle;
        pin
    }
}
