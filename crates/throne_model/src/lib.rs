//! Pure Rust settlement model for the throne game
//! No Solana dependencies, no unwrap/panic on the settlement path
//!
//! A deposit in either denomination is normalized to one canonical unit
//! through the oracle rate, checked against the strict 1.5x threshold, and
//! on success becomes the new locked deposit while the displaced holder is
//! paid back exactly what they put in.

pub mod error;
pub mod denomination;
pub mod oracle;
pub mod normalizer;
pub mod threshold;
pub mod ledger;
pub mod payout;
pub mod controller;
pub mod memory;
pub mod host;
pub mod helpers;

// Re-export commonly used types
pub use error::*;
pub use denomination::*;
pub use oracle::*;
pub use normalizer::*;
pub use threshold::*;
pub use ledger::*;
pub use payout::*;
pub use controller::*;

/// Account key of a player. Same width as an on-chain pubkey.
pub type Identity = [u8; 32];
