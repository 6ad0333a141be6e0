//! Mock implementations for testing without a real process environment.

pub mod env;

pub use env::*;
