//! Bounded inputs and a bookkeeping-only custody for the proofs

#[cfg(kani)]
use kani::any;
use throne_model::{Custody, Denomination, DenominationScales, Identity, TransferFailure};

// Small decimals keep every pow10 inside a few solver steps
pub const MAX_DECIMALS: u8 = 18;

/// Native 18 decimals against a 6 decimal token, as on an EVM-style chain
pub const ETH_USDC: DenominationScales = DenominationScales {
    primary_decimals: 18,
    secondary_decimals: 6,
};

#[cfg(kani)]
pub fn any_denomination() -> Denomination {
    if any::<bool>() {
        Denomination::Primary
    } else {
        Denomination::Secondary
    }
}

#[cfg(kani)]
pub fn any_identity() -> Identity {
    let tag: u8 = any();
    [tag; 32]
}

#[cfg(kani)]
pub fn any_decimals() -> u8 {
    let d: u8 = any();
    d % (MAX_DECIMALS + 1)
}

/// Custody that only counts what moved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyCustody {
    pub pulled: u64,
    pub sent: u64,
    pub unwound: u64,
    pub fail_sends: bool,
}

impl Custody for TallyCustody {
    fn pull(
        &mut self,
        _denomination: Denomination,
        _from: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        self.pulled = self.pulled.wrapping_add(amount);
        Ok(())
    }

    fn send(
        &mut self,
        _denomination: Denomination,
        _to: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        if self.fail_sends {
            return Err(TransferFailure::Rejected);
        }
        self.sent = self.sent.wrapping_add(amount);
        Ok(())
    }

    fn unwind_pull(&mut self, _denomination: Denomination, _from: &Identity, amount: u64) {
        self.unwound = self.unwound.wrapping_add(amount);
    }
}
