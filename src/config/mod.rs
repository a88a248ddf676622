//! Configuration module
//!
//! Loads client configuration from a TOML file.

mod client;

pub use client::*;
