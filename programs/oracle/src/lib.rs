//! Kingmaker Rate Feed Program
//!
//! Minimal exchange-rate feed consumed by the throne program. Prices one
//! whole secondary unit in whole primary units.
//!
//! ## Instructions
//!
//! - **Initialize** (0): Create a new feed with its first round
//! - **UpdatePrice** (1): Publish a new round (authority only)
//!
//! ## Account Structure
//!
//! ```text
//! RateFeed (128 bytes):
//!   magic: u64           - "KNGMRATE"
//!   version: u8          - Version (currently 0)
//!   bump: u8             - PDA bump seed
//!   decimals: u8         - Decimal places of price
//!   authority: Pubkey    - Who can update prices
//!   price: i64           - Latest price (scaled by 10^decimals)
//!   round_id: u64        - Latest round, starts at 1
//!   updated_at: i64      - Last update time
//! ```

// Always expose entrypoint for testing
pub mod entrypoint;

pub mod instructions;
pub mod state;

pub use state::{RateFeed, RoundAnswer, RATE_FEED_SIZE};

pinocchio_pubkey::declare_id!("5GrwPhwP6bs5gvMbc7TfTaDkkaP8ccEjzhouMyLr1XkF");
