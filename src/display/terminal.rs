//! Terminal display
//!
//! Renders the clock as a single stdout line that is rewritten in place.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use super::Display;

/// Carriage return followed by "erase to end of line"
const REWRITE_LINE: &str = "\r\x1b[K";

/// Stdout-backed display
///
/// Write failures are dropped: a missing terminal leaves the clock blank, it
/// does not stop the client.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    attached: AtomicBool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self, prefix: &str, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}{}", prefix, text);
        let _ = stdout.flush();
    }
}

impl Display for TerminalDisplay {
    fn attach(&self, text: &str) {
        // Keep the previous attempt's last line on screen
        let prefix = if self.attached.swap(true, Ordering::Relaxed) {
            "\n"
        } else {
            REWRITE_LINE
        };
        self.write(prefix, text);
    }

    fn set_text(&self, text: &str) {
        self.write(REWRITE_LINE, text);
    }
}
