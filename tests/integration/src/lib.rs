//! Kingmaker Integration Tests
//!
//! A three-player table over the settlement model, priced like the
//! aggregator feed the game was first played against: 18 decimal native
//! asset, 6 decimal stablecoin.

use throne_model::memory::{FixedRate, MemoryCustody};
use throne_model::{
    Coronation, Denomination, DenominationScales, GameController, GameError, Identity,
};

/// Wei per whole USDC, as reported by the feed (18 decimals)
pub const USDC_TO_WEI: i128 = 758_361_423_347_072;
pub const FEED_DECIMALS: u8 = 18;

pub const SCALES: DenominationScales = DenominationScales {
    primary_decimals: 18,
    secondary_decimals: 6,
};

pub const PLAYER1: Identity = [1; 32];
pub const PLAYER2: Identity = [2; 32];
pub const PLAYER3: Identity = [3; 32];

/// Whole USDC to base units
pub const fn usdc(whole: u64) -> u64 {
    whole * 1_000_000
}

/// Thousandths of an ether to wei
pub const fn milli_ether(milli: u64) -> u64 {
    milli * 1_000_000_000_000_000
}

pub type Game = GameController<FixedRate, MemoryCustody>;

/// Each player starts with 100 000 USDC and 10 ETH
pub fn table() -> Game {
    let mut custody = MemoryCustody::new();
    for player in [PLAYER1, PLAYER2, PLAYER3] {
        custody.fund(Denomination::Secondary, &player, usdc(100_000));
        custody.fund(Denomination::Primary, &player, milli_ether(10_000));
    }
    GameController::new(FixedRate::new(USDC_TO_WEI, FEED_DECIMALS), custody, SCALES)
}

pub fn play_with_ether(game: &mut Game, player: &Identity, wei: u64) -> Result<Coronation, GameError> {
    game.deposit_primary(player, wei)
}

/// Approve exactly `amount`, then play it
pub fn play_with_usdc(game: &mut Game, player: &Identity, amount: u64) -> Result<Coronation, GameError> {
    game.custody_mut().approve(player, amount);
    game.deposit_secondary(player, amount)
}

pub fn balance(game: &Game, denomination: Denomination, player: &Identity) -> u64 {
    game.custody().balance_of(denomination, player)
}

pub fn held(game: &Game, denomination: Denomination) -> u64 {
    game.custody().held(denomination)
}
