//! Display surfaces
//!
//! A display holds a single mutable text value. The client re-attaches the
//! surface at the start of every connection attempt and mutates the value on
//! each lifecycle event.

#[cfg(test)]
mod memory;
mod terminal;

#[cfg(test)]
pub use memory::*;
pub use terminal::*;

/// Surface the clock text is rendered into
pub trait Display: Send + Sync {
    /// Replace the surface content with a fresh text value
    fn attach(&self, text: &str);

    /// Update the current text value
    fn set_text(&self, text: &str);
}
