//! Custody of locked deposits and payout of displaced holders

use crate::denomination::Denomination;
use crate::error::TransferFailure;
use crate::Identity;

/// Funds held by the game, in both denominations.
///
/// Primary pulls take the value attached to the call; secondary pulls use the
/// token service's `transfer_from` after the player approved custody. Sends
/// are a direct value transfer or a token `transfer` respectively. No
/// conversion ever happens here.
pub trait Custody {
    fn pull(
        &mut self,
        denomination: Denomination,
        from: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure>;

    fn send(
        &mut self,
        denomination: Denomination,
        to: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure>;

    /// Reverse a `pull` that succeeded earlier in the same transition.
    ///
    /// Must put every balance (and allowance) back exactly. Hosts whose
    /// runtime discards a failed call's effects may treat this as a no-op.
    fn unwind_pull(&mut self, denomination: Denomination, from: &Identity, amount: u64);
}

/// Pays a displaced holder back the exact deposit they locked
#[derive(Debug, Clone, Copy, Default)]
pub struct PayoutEngine;

impl PayoutEngine {
    pub fn payout<C: Custody + ?Sized>(
        custody: &mut C,
        denomination: Denomination,
        amount: u64,
        recipient: &Identity,
    ) -> Result<(), TransferFailure> {
        custody.send(denomination, recipient, amount).map_err(|e| {
            log::warn!(
                "payout of {} {:?} to {} failed: {}",
                amount,
                denomination,
                crate::helpers::short_id(recipient),
                e
            );
            e
        })
    }
}
