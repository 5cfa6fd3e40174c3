//! Symbolic proofs over the threshold, the normalizer and deposit transitions

use crate::generators::*;
use kani::{any, assume};
use throne_model::memory::FixedRate;
use throne_model::{
    Denomination, GameController, GameError, KingLedger, OracleRate, ThresholdPolicy,
    ThroneRecord, ValueNormalizer,
};

/// The threshold is exactly "more than one and a half times"
#[kani::proof]
fn threshold_is_strict_one_and_a_half() {
    let current: u64 = any();
    let new: u64 = any();
    let expected = (new as u128) * 2 > (current as u128) * 3;
    kani::assert(
        ThresholdPolicy::qualifies(new as u128, current as u128) == expected,
        "qualifies must match new * 2 > current * 3",
    );
}

/// Qualifying is upward closed
#[kani::proof]
fn threshold_is_monotone() {
    let current: u128 = any();
    let a: u128 = any();
    let b: u128 = any();
    assume(a <= b);
    if ThresholdPolicy::qualifies(a, current) {
        kani::assert(ThresholdPolicy::qualifies(b, current), "larger deposits must also qualify");
    }
}

/// Floor normalization never ranks a smaller deposit above a larger one
#[kani::proof]
fn canonical_value_is_monotone() {
    let price: u32 = any();
    let decimals = any_decimals();
    let Some(rate) = OracleRate::new(price as i128, decimals) else {
        return;
    };
    let denomination = any_denomination();
    let normalizer = ValueNormalizer::new(ETH_USDC);

    let a: u32 = any();
    let b: u32 = any();
    assume(a <= b);

    if let (Ok(low), Ok(high)) = (
        normalizer.canonical_value(denomination, a as u64, &rate),
        normalizer.canonical_value(denomination, b as u64, &rate),
    ) {
        kani::assert(low <= high, "normalization must be monotone");
    }
}

/// The minimum quoted to dethrone is the least raw amount that qualifies
#[kani::proof]
fn smallest_raw_exceeding_is_tight() {
    let price: u16 = any();
    let Some(rate) = OracleRate::new(price as i128, 6) else {
        return;
    };
    let normalizer = ValueNormalizer::new(ETH_USDC);
    let target: u32 = any();

    if let Ok(raw) = normalizer.smallest_raw_exceeding(Denomination::Secondary, target as u128, &rate) {
        let at = normalizer.canonical_value(Denomination::Secondary, raw, &rate);
        kani::assert(matches!(at, Ok(v) if v > target as u128), "minimum must exceed the target");
        if raw > 1 {
            let below = normalizer.canonical_value(Denomination::Secondary, raw - 1, &rate);
            kani::assert(matches!(below, Ok(v) if v <= target as u128), "one less must not");
        }
    }
}

fn occupied_game(
    locked: u32,
    fail_sends: bool,
) -> GameController<FixedRate, TallyCustody> {
    let record = ThroneRecord {
        holder: [1; 32],
        denomination: Denomination::Primary,
        raw_amount: locked as u64,
        canonical_value: locked as u128,
    };
    GameController::with_ledger(
        FixedRate::new(758_361_423_347_072, 18),
        TallyCustody {
            fail_sends,
            ..TallyCustody::default()
        },
        ETH_USDC,
        KingLedger::from_record(Some(record), 1),
    )
}

/// A rejected deposit touches neither the ledger nor custody
#[kani::proof]
fn rejection_leaves_state_unchanged() {
    let mut game = occupied_game(any(), false);
    let before = game.ledger().clone();

    let caller = any_identity();
    let amount: u32 = any();
    if game.deposit(&caller, Denomination::Primary, amount as u64).is_err() {
        kani::assert(game.ledger() == &before, "ledger must be unchanged");
        kani::assert(*game.custody() == TallyCustody::default(), "no funds may move");
    }
}

/// A successful deposit pays the displaced holder exactly their deposit
#[kani::proof]
fn coronation_pays_exact_deposit() {
    let locked: u32 = any();
    let mut game = occupied_game(locked, false);

    let amount: u32 = any();
    if game.deposit(&[2; 32], Denomination::Primary, amount as u64).is_ok() {
        kani::assert(game.custody().sent == locked as u64, "payout must equal the locked deposit");
        kani::assert(game.custody().pulled == amount as u64, "pull must equal the new deposit");
        kani::assert(game.ledger().reigns() == 2, "reign count advances by one");
    }
}

/// A failed payout rolls the whole play back
#[kani::proof]
fn failed_payout_restores_ledger() {
    let mut game = occupied_game(any(), true);
    let before = game.ledger().clone();

    let amount: u32 = any();
    let result = game.deposit(&[2; 32], Denomination::Primary, amount as u64);
    if let Err(GameError::TransferFailure(_)) = result {
        kani::assert(game.ledger() == &before, "ledger must be restored");
        kani::assert(game.custody().unwound == game.custody().pulled, "pull must be unwound");
    }
    kani::assert(result.is_err(), "nothing can win while payouts fail");
}
