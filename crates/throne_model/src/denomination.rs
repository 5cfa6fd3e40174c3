//! Denominations and locked deposits

use serde::{Deserialize, Serialize};

/// One of the two assets the game accepts
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    /// Native asset, attached directly to the call
    Primary = 0,
    /// Token asset, pulled from the caller after approval
    Secondary = 1,
}

impl Denomination {
    /// Decode the on-chain tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Primary),
            1 => Some(Self::Secondary),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Decimal places of each denomination's base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominationScales {
    pub primary_decimals: u8,
    pub secondary_decimals: u8,
}

impl DenominationScales {
    /// Lamports (9) against a 6-decimal stablecoin
    pub const NATIVE_USDC: Self = Self {
        primary_decimals: 9,
        secondary_decimals: 6,
    };

    pub fn new(primary_decimals: u8, secondary_decimals: u8) -> Self {
        Self {
            primary_decimals,
            secondary_decimals,
        }
    }

    pub fn decimals(&self, denomination: Denomination) -> u8 {
        match denomination {
            Denomination::Primary => self.primary_decimals,
            Denomination::Secondary => self.secondary_decimals,
        }
    }
}

impl Default for DenominationScales {
    fn default() -> Self {
        Self::NATIVE_USDC
    }
}

/// A deposit locked in custody by the current holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub denomination: Denomination,
    /// Amount in the denomination's base units, exactly as received
    pub raw_amount: u64,
    /// Value in primary base units at the rate seen when it was accepted
    pub canonical_value: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denomination_tag_roundtrip() {
        assert_eq!(Denomination::from_u8(0), Some(Denomination::Primary));
        assert_eq!(Denomination::from_u8(1), Some(Denomination::Secondary));
        assert_eq!(Denomination::from_u8(2), None);
        assert_eq!(Denomination::Secondary.as_u8(), 1);
    }

    #[test]
    fn test_scales_lookup() {
        let scales = DenominationScales::new(18, 6);
        assert_eq!(scales.decimals(Denomination::Primary), 18);
        assert_eq!(scales.decimals(Denomination::Secondary), 6);
        assert_eq!(DenominationScales::default(), DenominationScales::NATIVE_USDC);
    }
}
