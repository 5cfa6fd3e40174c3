//! Rate feed state
//!
//! Stores the price of one whole secondary unit in whole primary units,
//! scaled by `10^decimals`, with round metadata like an aggregator feed.

use pinocchio::pubkey::Pubkey;

/// Size of RateFeed account: 128 bytes
pub const RATE_FEED_SIZE: usize = 128;

/// Answer of the feed's latest round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundAnswer {
    pub round_id: u64,
    pub price: i64,
    pub decimals: u8,
    pub updated_at: i64,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct RateFeed {
    /// Magic bytes: "KNGMRATE"
    pub magic: u64,

    /// Version (currently 0)
    pub version: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Decimal places of `price`
    pub decimals: u8,

    /// Padding for alignment
    pub _padding: [u8; 5],

    /// Authority that can update prices
    pub authority: Pubkey,

    /// Latest price; zero or negative means the feed is unusable
    pub price: i64,

    /// Incremented on every update, starts at 1
    pub round_id: u64,

    /// Unix timestamp of the latest update
    pub updated_at: i64,

    /// Reserved for future use (56 bytes to reach 128 total)
    pub _reserved: [u8; 56],
}

impl RateFeed {
    pub const MAGIC: &'static [u8; 8] = b"KNGMRATE";

    pub const VERSION: u8 = 0;

    pub fn new(authority: Pubkey, price: i64, decimals: u8, bump: u8) -> Self {
        Self {
            magic: u64::from_le_bytes(*Self::MAGIC),
            version: Self::VERSION,
            bump,
            decimals,
            _padding: [0; 5],
            authority,
            price,
            round_id: 1,
            updated_at: 0,
            _reserved: [0; 56],
        }
    }

    pub fn validate(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    /// Start a new round with `price`
    pub fn update_price(&mut self, price: i64, timestamp: i64) {
        self.price = price;
        self.updated_at = timestamp;
        self.round_id = self.round_id.wrapping_add(1);
    }

    pub fn latest_round_data(&self) -> RoundAnswer {
        RoundAnswer {
            round_id: self.round_id,
            price: self.price,
            decimals: self.decimals,
            updated_at: self.updated_at,
        }
    }
}
