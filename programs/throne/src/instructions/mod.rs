//! Throne instruction handlers

pub mod initialize;
pub mod play;

pub use initialize::*;
pub use play::*;
