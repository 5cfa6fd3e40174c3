//! Kingmaker Throne Program
//!
//! King-of-the-hill over two denominations. A play deposits lamports or
//! tokens; its value is normalized through the rate feed and must strictly
//! exceed 1.5x the current holder's locked value. The winner's deposit is
//! locked and the displaced holder is paid back exactly what they put in,
//! in the denomination they used.
//!
//! ## Instructions
//!
//! - **Initialize** (0): Create the throne for a rate feed and mint
//! - **PlayWithNative** (1): Deposit lamports
//! - **PlayWithToken** (2): Deposit tokens approved to the throne PDA
//!
//! ## Account Structure
//!
//! ```text
//! Throne (240 bytes, PDA ["throne"]):
//!   magic: u64               - "KNGMTHRN"
//!   version: u8              - Version (currently 0)
//!   bump: u8                 - PDA bump seed
//!   secondary_decimals: u8   - Decimals of the secondary mint
//!   occupied: u8             - 1 once someone holds the throne
//!   denomination: u8         - 0 native, 1 token
//!   authority: Pubkey        - Who initialized the game
//!   oracle: Pubkey           - Rate feed
//!   secondary_mint: Pubkey   - Token mint
//!   vault: Pubkey            - Token custody, owned by the PDA
//!   holder: Pubkey           - Current holder
//!   raw_amount: u64          - Locked deposit
//!   canonical_value: u128    - Locked deposit in lamports
//!   reigns: u64              - Successful plays so far
//! ```

pub mod entrypoint;

pub mod adapters;
pub mod cpi;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod token;

pinocchio_pubkey::declare_id!("B1fARkCqeQCAgPJopd3z57CeBZYKTZhRvxa5P8ijNdiZ");

pub use state::{Throne, NATIVE_DECIMALS};
