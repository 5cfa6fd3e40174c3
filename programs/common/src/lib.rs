//! Shared on-chain plumbing for the kingmaker programs

pub mod error;
pub mod account;
pub mod instruction;

pub use error::*;
pub use account::*;
pub use instruction::*;
