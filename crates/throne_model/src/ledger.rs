//! The single current-leader record

use serde::{Deserialize, Serialize};

use crate::denomination::{Denomination, Deposit};
use crate::Identity;

/// Who holds the throne, if anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingState {
    Empty,
    Occupied { holder: Identity, deposit: Deposit },
}

impl KingState {
    pub fn holder(&self) -> Option<&Identity> {
        match self {
            KingState::Empty => None,
            KingState::Occupied { holder, .. } => Some(holder),
        }
    }

    pub fn deposit(&self) -> Option<&Deposit> {
        match self {
            KingState::Empty => None,
            KingState::Occupied { deposit, .. } => Some(deposit),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, KingState::Empty)
    }
}

/// Durable form of an occupied throne: one row, four fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroneRecord {
    pub holder: Identity,
    pub denomination: Denomination,
    pub raw_amount: u64,
    pub canonical_value: u128,
}

impl From<ThroneRecord> for KingState {
    fn from(record: ThroneRecord) -> Self {
        KingState::Occupied {
            holder: record.holder,
            deposit: Deposit {
                denomination: record.denomination,
                raw_amount: record.raw_amount,
                canonical_value: record.canonical_value,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingLedger {
    state: KingState,
    /// Successful coronations since the ledger was created
    reigns: u64,
}

impl Default for KingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl KingLedger {
    pub fn new() -> Self {
        Self {
            state: KingState::Empty,
            reigns: 0,
        }
    }

    /// Rebuild from persisted state
    pub fn from_record(record: Option<ThroneRecord>, reigns: u64) -> Self {
        Self {
            state: record.map_or(KingState::Empty, KingState::from),
            reigns,
        }
    }

    pub fn current(&self) -> &KingState {
        &self.state
    }

    pub fn reigns(&self) -> u64 {
        self.reigns
    }

    pub fn record(&self) -> Option<ThroneRecord> {
        match self.state {
            KingState::Empty => None,
            KingState::Occupied { holder, deposit } => Some(ThroneRecord {
                holder,
                denomination: deposit.denomination,
                raw_amount: deposit.raw_amount,
                canonical_value: deposit.canonical_value,
            }),
        }
    }

    /// Install a new holder and hand back whatever was displaced.
    ///
    /// Only the controller calls this, and only after the threshold check
    /// passed.
    pub(crate) fn commit(&mut self, holder: Identity, deposit: Deposit) -> KingState {
        self.reigns = self.reigns.saturating_add(1);
        core::mem::replace(&mut self.state, KingState::Occupied { holder, deposit })
    }

    /// Undo the last commit
    pub(crate) fn restore(&mut self, prior: KingState) {
        self.reigns = self.reigns.saturating_sub(1);
        self.state = prior;
    }
}
