//! Deposit transitions
//!
//! Every check (self-play, amount, oracle, normalization, threshold) runs
//! before anything is mutated. Effects then happen in a fixed order:
//!
//! 1. pull the challenger's funds into custody
//! 2. commit the new holder to the ledger
//! 3. pay the displaced holder back
//!
//! The ledger is committed before the payout leaves custody, so anything the
//! payout triggers observes the new holder. If the payout fails, the ledger
//! is restored and the pull is unwound: the call either happens completely
//! or not at all.

use crate::denomination::{Denomination, DenominationScales, Deposit};
use crate::error::GameError;
use crate::helpers::short_id;
use crate::ledger::{KingLedger, KingState};
use crate::normalizer::ValueNormalizer;
use crate::oracle::{PriceOracleAdapter, RateSource};
use crate::payout::{Custody, PayoutEngine};
use crate::threshold::ThresholdPolicy;
use crate::Identity;

/// Receipt of a successful deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coronation {
    pub holder: Identity,
    pub deposit: Deposit,
    /// Previous holder and the deposit they were paid back
    pub displaced: Option<(Identity, Deposit)>,
}

pub struct GameController<S, C> {
    oracle: PriceOracleAdapter<S>,
    normalizer: ValueNormalizer,
    ledger: KingLedger,
    custody: C,
}

impl<S: RateSource, C: Custody> GameController<S, C> {
    /// Fresh game with an empty throne
    pub fn new(source: S, custody: C, scales: DenominationScales) -> Self {
        Self::with_ledger(source, custody, scales, KingLedger::new())
    }

    /// Resume a game from persisted state
    pub fn with_ledger(
        source: S,
        custody: C,
        scales: DenominationScales,
        ledger: KingLedger,
    ) -> Self {
        Self {
            oracle: PriceOracleAdapter::new(source),
            normalizer: ValueNormalizer::new(scales),
            ledger,
            custody,
        }
    }

    pub fn current(&self) -> &KingState {
        self.ledger.current()
    }

    pub fn current_holder(&self) -> Option<&Identity> {
        self.ledger.current().holder()
    }

    pub fn ledger(&self) -> &KingLedger {
        &self.ledger
    }

    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Host-side access for funding wallets and approvals between plays
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    pub fn oracle(&self) -> &S {
        self.oracle.source()
    }

    pub fn oracle_mut(&mut self) -> &mut S {
        self.oracle.source_mut()
    }

    pub fn normalizer(&self) -> &ValueNormalizer {
        &self.normalizer
    }

    pub fn into_parts(self) -> (S, C, KingLedger) {
        let Self {
            oracle,
            ledger,
            custody,
            ..
        } = self;
        let source = oracle.into_source();
        (source, custody, ledger)
    }

    /// Smallest raw amount of `denomination` that would take the throne at
    /// the current rate
    pub fn minimum_to_dethrone(&self, denomination: Denomination) -> Result<u64, GameError> {
        match self.ledger.current().deposit() {
            None => Ok(1),
            Some(deposit) => {
                let rate = self.oracle.get_rate()?;
                self.normalizer.smallest_raw_exceeding(
                    denomination,
                    ThresholdPolicy::threshold(deposit.canonical_value),
                    &rate,
                )
            }
        }
    }

    /// Deposit native value attached to the call
    pub fn deposit_primary(
        &mut self,
        caller: &Identity,
        amount: u64,
    ) -> Result<Coronation, GameError> {
        self.deposit(caller, Denomination::Primary, amount)
    }

    /// Deposit tokens the caller approved beforehand
    pub fn deposit_secondary(
        &mut self,
        caller: &Identity,
        amount: u64,
    ) -> Result<Coronation, GameError> {
        self.deposit(caller, Denomination::Secondary, amount)
    }

    pub fn deposit(
        &mut self,
        caller: &Identity,
        denomination: Denomination,
        raw_amount: u64,
    ) -> Result<Coronation, GameError> {
        let deposit = self.evaluate(caller, denomination, raw_amount)?;

        self.custody.pull(denomination, caller, raw_amount)?;
        let prior = self.ledger.commit(*caller, deposit);

        let displaced = match prior {
            KingState::Empty => None,
            KingState::Occupied {
                holder: ousted,
                deposit: locked,
            } => {
                let paid = PayoutEngine::payout(
                    &mut self.custody,
                    locked.denomination,
                    locked.raw_amount,
                    &ousted,
                );
                if let Err(failure) = paid {
                    self.ledger.restore(prior);
                    self.custody.unwind_pull(denomination, caller, raw_amount);
                    return Err(failure.into());
                }
                Some((ousted, locked))
            }
        };

        log::info!(
            "coronation #{}: {} holds {} {:?} (canonical {})",
            self.ledger.reigns(),
            short_id(caller),
            raw_amount,
            denomination,
            deposit.canonical_value
        );

        Ok(Coronation {
            holder: *caller,
            deposit,
            displaced,
        })
    }

    /// All checks, no effects
    fn evaluate(
        &self,
        caller: &Identity,
        denomination: Denomination,
        raw_amount: u64,
    ) -> Result<Deposit, GameError> {
        if self.ledger.current().holder() == Some(caller) {
            return Err(GameError::SelfPlay);
        }
        if raw_amount == 0 {
            return Err(GameError::InvalidAmount);
        }

        let rate = self.oracle.get_rate()?;
        let canonical_value = self
            .normalizer
            .canonical_value(denomination, raw_amount, &rate)?;

        let current = self.ledger.current().deposit().map(|d| d.canonical_value);
        if !ThresholdPolicy::admits(canonical_value, current) {
            log::debug!(
                "rejected {} {:?} from {}: canonical {} vs holder {:?}",
                raw_amount,
                denomination,
                short_id(caller),
                canonical_value,
                current
            );
            return Err(GameError::InsufficientDeposit);
        }

        Ok(Deposit {
            denomination,
            raw_amount,
            canonical_value,
        })
    }
}
