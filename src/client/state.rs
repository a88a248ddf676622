//! Client lifecycle state

use std::fmt;

/// Shown while a connection attempt is in flight
pub const CONNECTING_TEXT: &str = "Connecting...";
/// Shown once the connection opens, until the first update arrives
pub const CONNECTED_TEXT: &str = "Connected...";
/// Shown on a transport error
pub const ERROR_TEXT: &str = "Connection error";
/// Shown after a closure, while waiting to reconnect
pub const RECONNECTING_TEXT: &str = "Reconnecting...";

/// Lifecycle of a [`ClockClient`](super::ClockClient)
///
/// `Idle → Connecting → Connected → (Closed | Errored) → Connecting → ...`
/// The cycle has no terminal state of its own; only an explicit stop moves the
/// client to `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Idle,
    Connecting,
    Connected,
    Errored,
    Closed,
    Stopped,
}

impl ClientState {
    /// Fixed status text for states that carry one
    ///
    /// `Connected` only shows its text on open; later updates replace it with
    /// the pushed time.
    pub fn status_text(self) -> Option<&'static str> {
        match self {
            ClientState::Connecting => Some(CONNECTING_TEXT),
            ClientState::Connected => Some(CONNECTED_TEXT),
            ClientState::Errored => Some(ERROR_TEXT),
            ClientState::Closed => Some(RECONNECTING_TEXT),
            ClientState::Idle | ClientState::Stopped => None,
        }
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClientState::Idle => "idle",
            ClientState::Connecting => "connecting",
            ClientState::Connected => "connected",
            ClientState::Errored => "errored",
            ClientState::Closed => "closed",
            ClientState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_texts() {
        assert_eq!(ClientState::Connecting.status_text(), Some("Connecting..."));
        assert_eq!(ClientState::Connected.status_text(), Some("Connected..."));
        assert_eq!(ClientState::Errored.status_text(), Some("Connection error"));
        assert_eq!(ClientState::Closed.status_text(), Some("Reconnecting..."));
        assert_eq!(ClientState::Idle.status_text(), None);
        assert_eq!(ClientState::Stopped.status_text(), None);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ClientState::Errored.to_string(), "errored");
        assert_eq!(ClientState::Closed.to_string(), "closed");
    }
}
