//! Clock client module
//!
//! Connects to the clock server, renders pushed time updates into a display
//! surface and reconnects after every closure.

mod clock;
mod protocol;
mod state;

pub use clock::*;
pub use protocol::*;
pub use state::*;
