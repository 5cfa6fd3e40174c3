//! Concrete proofs with the fixtures the integration suite uses

use crate::generators::*;
use throne_model::memory::FixedRate;
use throne_model::{Denomination, GameController, GameError};

const USDC_TO_WEI: i128 = 758_361_423_347_072;

/// Close call: one micro-unit decides the throne
#[kani::proof]
fn close_call_concrete() {
    let mut game = GameController::new(
        FixedRate::new(USDC_TO_WEI, 18),
        TallyCustody::default(),
        ETH_USDC,
    );
    game.deposit(&[1; 32], Denomination::Primary, 11_298_400_000_000_543)
        .unwrap();

    assert_eq!(
        game.deposit(&[2; 32], Denomination::Secondary, 22_347_655),
        Err(GameError::InsufficientDeposit)
    );
    assert!(game
        .deposit(&[2; 32], Denomination::Secondary, 22_347_656)
        .is_ok());
}

/// Holder cannot outbid themselves, whatever the amount
#[kani::proof]
fn self_play_concrete() {
    let mut game = GameController::new(
        FixedRate::new(USDC_TO_WEI, 18),
        TallyCustody::default(),
        ETH_USDC,
    );
    game.deposit(&[1; 32], Denomination::Secondary, 15_000_000)
        .unwrap();
    assert_eq!(
        game.deposit(&[1; 32], Denomination::Primary, u64::MAX),
        Err(GameError::SelfPlay)
    );
}
