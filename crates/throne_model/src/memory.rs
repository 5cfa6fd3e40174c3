//! In-memory collaborators for off-chain hosts and tests

use std::collections::{HashMap, HashSet};

use crate::denomination::Denomination;
use crate::error::{GameError, TransferFailure};
use crate::oracle::{RateSource, RoundData};
use crate::payout::Custody;
use crate::Identity;

/// Rate feed with a settable answer. Each update starts a new round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRate {
    round: RoundData,
}

impl FixedRate {
    pub fn new(price: i128, decimals: u8) -> Self {
        Self {
            round: RoundData {
                round_id: 1,
                price,
                decimals,
                updated_at: 0,
            },
        }
    }

    pub fn set_price(&mut self, price: i128) {
        self.round.round_id = self.round.round_id.wrapping_add(1);
        self.round.price = price;
    }

    pub fn set_updated_at(&mut self, updated_at: i64) {
        self.round.updated_at = updated_at;
    }
}

impl RateSource for FixedRate {
    fn latest_round_data(&self) -> Result<RoundData, GameError> {
        Ok(self.round)
    }
}

/// Player wallets, token allowances and the game's custody balances.
///
/// Allowances follow token `approve` semantics: they apply to the secondary
/// denomination only, overwrite on approve, and are consumed by pulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCustody {
    wallets: HashMap<(Denomination, Identity), u64>,
    allowances: HashMap<Identity, u64>,
    held_primary: u64,
    held_secondary: u64,
    rejecting: HashSet<Identity>,
}

impl MemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a player's wallet from outside the game
    pub fn fund(&mut self, denomination: Denomination, who: &Identity, amount: u64) {
        let balance = self.wallets.entry((denomination, *who)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Let custody pull up to `amount` secondary units from `who`
    pub fn approve(&mut self, who: &Identity, amount: u64) {
        self.allowances.insert(*who, amount);
    }

    pub fn allowance(&self, who: &Identity) -> u64 {
        self.allowances.get(who).copied().unwrap_or(0)
    }

    pub fn balance_of(&self, denomination: Denomination, who: &Identity) -> u64 {
        self.wallets.get(&(denomination, *who)).copied().unwrap_or(0)
    }

    /// What the game currently holds in `denomination`
    pub fn held(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Primary => self.held_primary,
            Denomination::Secondary => self.held_secondary,
        }
    }

    /// Make every send to `who` fail, like a recipient that refuses payment
    pub fn reject_sends_to(&mut self, who: Identity) {
        self.rejecting.insert(who);
    }

    pub fn accept_sends_to(&mut self, who: &Identity) {
        self.rejecting.remove(who);
    }

    fn held_mut(&mut self, denomination: Denomination) -> &mut u64 {
        match denomination {
            Denomination::Primary => &mut self.held_primary,
            Denomination::Secondary => &mut self.held_secondary,
        }
    }
}

impl Custody for MemoryCustody {
    fn pull(
        &mut self,
        denomination: Denomination,
        from: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        if denomination == Denomination::Secondary && self.allowance(from) < amount {
            return Err(TransferFailure::InsufficientAllowance);
        }
        let balance = self.balance_of(denomination, from);
        if balance < amount {
            return Err(TransferFailure::InsufficientFunds);
        }
        let held = self
            .held(denomination)
            .checked_add(amount)
            .ok_or(TransferFailure::Rejected)?;

        self.wallets.insert((denomination, *from), balance - amount);
        if denomination == Denomination::Secondary {
            let allowance = self.allowance(from);
            self.allowances.insert(*from, allowance - amount);
        }
        *self.held_mut(denomination) = held;
        Ok(())
    }

    fn send(
        &mut self,
        denomination: Denomination,
        to: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        if self.rejecting.contains(to) {
            return Err(TransferFailure::Rejected);
        }
        let held = self.held(denomination);
        if held < amount {
            return Err(TransferFailure::InsufficientFunds);
        }
        *self.held_mut(denomination) = held - amount;
        self.fund(denomination, to, amount);
        Ok(())
    }

    fn unwind_pull(&mut self, denomination: Denomination, from: &Identity, amount: u64) {
        let held = self.held_mut(denomination);
        *held = held.saturating_sub(amount);
        self.fund(denomination, from, amount);
        if denomination == Denomination::Secondary {
            let allowance = self.allowance(from).saturating_add(amount);
            self.allowances.insert(*from, allowance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Identity = [1; 32];

    #[test]
    fn test_primary_pull_needs_funds_only() {
        let mut c = MemoryCustody::new();
        c.fund(Denomination::Primary, &ALICE, 100);

        assert_eq!(
            c.pull(Denomination::Primary, &ALICE, 101),
            Err(TransferFailure::InsufficientFunds)
        );
        c.pull(Denomination::Primary, &ALICE, 60).unwrap();
        assert_eq!(c.balance_of(Denomination::Primary, &ALICE), 40);
        assert_eq!(c.held(Denomination::Primary), 60);
    }

    #[test]
    fn test_secondary_pull_consumes_allowance() {
        let mut c = MemoryCustody::new();
        c.fund(Denomination::Secondary, &ALICE, 100);

        assert_eq!(
            c.pull(Denomination::Secondary, &ALICE, 50),
            Err(TransferFailure::InsufficientAllowance)
        );

        c.approve(&ALICE, 80);
        c.pull(Denomination::Secondary, &ALICE, 50).unwrap();
        assert_eq!(c.allowance(&ALICE), 30);
        assert_eq!(c.held(Denomination::Secondary), 50);

        c.approve(&ALICE, 500);
        assert_eq!(
            c.pull(Denomination::Secondary, &ALICE, 200),
            Err(TransferFailure::InsufficientFunds)
        );
    }

    #[test]
    fn test_unwind_restores_exactly() {
        let mut c = MemoryCustody::new();
        c.fund(Denomination::Secondary, &ALICE, 100);
        c.approve(&ALICE, 100);
        let before = c.clone();

        c.pull(Denomination::Secondary, &ALICE, 70).unwrap();
        c.unwind_pull(Denomination::Secondary, &ALICE, 70);

        assert_eq!(c, before);
    }

    #[test]
    fn test_rejecting_recipient() {
        let mut c = MemoryCustody::new();
        c.fund(Denomination::Primary, &ALICE, 10);
        c.pull(Denomination::Primary, &ALICE, 10).unwrap();

        c.reject_sends_to(ALICE);
        assert_eq!(
            c.send(Denomination::Primary, &ALICE, 10),
            Err(TransferFailure::Rejected)
        );
        c.accept_sends_to(&ALICE);
        c.send(Denomination::Primary, &ALICE, 10).unwrap();
        assert_eq!(c.balance_of(Denomination::Primary, &ALICE), 10);
    }

    #[test]
    fn test_fixed_rate_rounds() {
        let mut feed = FixedRate::new(5, 2);
        assert_eq!(feed.latest_round_data().unwrap().round_id, 1);
        feed.set_price(6);
        let round = feed.latest_round_data().unwrap();
        assert_eq!((round.round_id, round.price, round.decimals), (2, 6, 2));
    }
}
