//! In-memory display used by the client tests

use std::sync::Mutex;

use super::Display;

#[derive(Debug, Default)]
struct Surface {
    current: String,
    history: Vec<String>,
    attachments: usize,
}

/// Display that records every value written to it
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    surface: Mutex<Surface>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text value
    pub fn text(&self) -> String {
        self.surface.lock().unwrap().current.clone()
    }

    /// Every value written, in order
    pub fn history(&self) -> Vec<String> {
        self.surface.lock().unwrap().history.clone()
    }

    /// Number of times the surface was re-attached
    pub fn attachments(&self) -> usize {
        self.surface.lock().unwrap().attachments
    }
}

impl Display for MemoryDisplay {
    fn attach(&self, text: &str) {
        let mut surface = self.surface.lock().unwrap();
        surface.attachments += 1;
        surface.current = text.to_string();
        surface.history.push(text.to_string());
    }

    fn set_text(&self, text: &str) {
        let mut surface = self.surface.lock().unwrap();
        surface.current = text.to_string();
        surface.history.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_replaces_value() {
        let display = MemoryDisplay::new();
        display.attach("Connecting...");
        display.set_text("12:00:00");
        display.attach("Connecting...");

        assert_eq!(display.text(), "Connecting...");
        assert_eq!(display.attachments(), 2);
        assert_eq!(
            display.history(),
            vec!["Connecting...", "12:00:00", "Connecting..."]
        );
    }
}
