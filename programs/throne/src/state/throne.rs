//! Throne account: game configuration plus the single leader record

use pinocchio::pubkey::Pubkey;
use throne_model::{
    Denomination, DenominationScales, KingLedger, ThroneRecord,
};

/// Lamports carry 9 decimals
pub const NATIVE_DECIMALS: u8 = 9;

/// Throne account
/// PDA: ["throne"]
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Throne {
    /// Magic bytes: "KNGMTHRN"
    pub magic: u64,
    /// Version (currently 0)
    pub version: u8,
    /// Bump seed of the throne PDA
    pub bump: u8,
    /// Decimals of the secondary mint, copied at initialization
    pub secondary_decimals: u8,
    /// 1 when a holder is recorded
    pub occupied: u8,
    /// Denomination tag of the locked deposit
    pub denomination: u8,
    /// Padding
    pub _padding: [u8; 3],
    /// Who initialized the game
    pub authority: Pubkey,
    /// Rate feed the game reads
    pub oracle: Pubkey,
    /// Mint of the secondary denomination
    pub secondary_mint: Pubkey,
    /// Token account (owned by the throne PDA) holding secondary deposits
    pub vault: Pubkey,
    /// Current holder
    pub holder: Pubkey,
    /// Locked deposit, raw units
    pub raw_amount: u64,
    /// Locked deposit, canonical value (u128 little-endian)
    pub canonical_value: [u8; 16],
    /// Successful coronations
    pub reigns: u64,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Throne {
    pub const LEN: usize = core::mem::size_of::<Self>();

    pub const MAGIC: &'static [u8; 8] = b"KNGMTHRN";

    pub const VERSION: u8 = 0;

    pub fn new(
        authority: Pubkey,
        oracle: Pubkey,
        secondary_mint: Pubkey,
        vault: Pubkey,
        secondary_decimals: u8,
        bump: u8,
    ) -> Self {
        Self {
            magic: u64::from_le_bytes(*Self::MAGIC),
            version: Self::VERSION,
            bump,
            secondary_decimals,
            occupied: 0,
            denomination: 0,
            _padding: [0; 3],
            authority,
            oracle,
            secondary_mint,
            vault,
            holder: Pubkey::default(),
            raw_amount: 0,
            canonical_value: [0; 16],
            reigns: 0,
            _reserved: [0; 32],
        }
    }

    /// Magic, version, and a known denomination tag once occupied
    pub fn validate(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC)
            && self.version == Self::VERSION
            && (self.occupied == 0 || Denomination::from_u8(self.denomination).is_some())
    }

    pub fn scales(&self) -> DenominationScales {
        DenominationScales::new(NATIVE_DECIMALS, self.secondary_decimals)
    }

    /// Occupied record; `None` when empty or when the tag is unknown
    pub fn record(&self) -> Option<ThroneRecord> {
        if self.occupied == 0 {
            return None;
        }
        Some(ThroneRecord {
            holder: self.holder,
            denomination: Denomination::from_u8(self.denomination)?,
            raw_amount: self.raw_amount,
            canonical_value: u128::from_le_bytes(self.canonical_value),
        })
    }

    pub fn current_holder(&self) -> Option<&Pubkey> {
        self.record().is_some().then_some(&self.holder)
    }

    pub fn ledger(&self) -> KingLedger {
        KingLedger::from_record(self.record(), self.reigns)
    }

    /// Write the ledger back into the account
    pub fn store(&mut self, ledger: &KingLedger) {
        match ledger.record() {
            None => {
                self.occupied = 0;
                self.denomination = 0;
                self.holder = Pubkey::default();
                self.raw_amount = 0;
                self.canonical_value = [0; 16];
            }
            Some(record) => {
                self.occupied = 1;
                self.denomination = record.denomination.as_u8();
                self.holder = record.holder;
                self.raw_amount = record.raw_amount;
                self.canonical_value = record.canonical_value.to_le_bytes();
            }
        }
        self.reigns = ledger.reigns();
    }
}
