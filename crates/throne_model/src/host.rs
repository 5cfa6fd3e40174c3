//! Serialized access for concurrent hosts
//!
//! One mutex per game: every transition and every read goes through the
//! same lock, so callers on different threads observe a total order of
//! transitions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::controller::{Coronation, GameController};
use crate::denomination::Denomination;
use crate::error::GameError;
use crate::ledger::{KingState, ThroneRecord};
use crate::oracle::RateSource;
use crate::payout::Custody;
use crate::Identity;

pub struct SharedGame<S, C> {
    inner: Arc<Mutex<GameController<S, C>>>,
}

impl<S, C> Clone for SharedGame<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RateSource, C: Custody> SharedGame<S, C> {
    pub fn new(controller: GameController<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    // Transitions never panic half-way, so a poisoned lock still guards a
    // consistent game.
    fn lock(&self) -> MutexGuard<'_, GameController<S, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn deposit(
        &self,
        caller: &Identity,
        denomination: Denomination,
        raw_amount: u64,
    ) -> Result<Coronation, GameError> {
        self.lock().deposit(caller, denomination, raw_amount)
    }

    pub fn current(&self) -> KingState {
        *self.lock().current()
    }

    pub fn current_holder(&self) -> Option<Identity> {
        self.lock().current_holder().copied()
    }

    pub fn record(&self) -> Option<ThroneRecord> {
        self.lock().ledger().record()
    }

    /// Run `f` with exclusive access, e.g. to fund wallets or move the rate
    pub fn with<R>(&self, f: impl FnOnce(&mut GameController<S, C>) -> R) -> R {
        f(&mut self.lock())
    }
}
