//! Throne scenarios: deposits, dethroning, cross-denomination payouts

use kingmaker_integration_tests::*;
use throne_model::host::SharedGame;
use throne_model::{Denomination, GameError};

const ETH: Denomination = Denomination::Primary;
const USDC: Denomination = Denomination::Secondary;

#[test]
fn test_fresh_table_holds_nothing() {
    let game = table();
    assert_eq!(held(&game, ETH), 0);
    assert_eq!(held(&game, USDC), 0);
    assert_eq!(game.current_holder(), None);
}

#[test]
fn test_accepts_ether_deposit() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    assert_eq!(held(&game, ETH), milli_ether(1_000));
}

#[test]
fn test_accepts_usdc_deposit() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();

    assert_eq!(held(&game, USDC), usdc(20));
}

#[test]
fn test_first_ether_player_is_king() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER1));
}

#[test]
fn test_first_usdc_player_is_king() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER1));
}

#[test]
fn test_larger_ether_deposit_takes_throne() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();
    play_with_ether(&mut game, &PLAYER2, milli_ether(2_000)).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER2));
}

#[test]
fn test_ether_at_or_below_one_and_a_half_is_rejected() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    assert_eq!(
        play_with_ether(&mut game, &PLAYER2, milli_ether(1_400)),
        Err(GameError::InsufficientDeposit)
    );
    assert_eq!(
        play_with_ether(&mut game, &PLAYER2, milli_ether(1_500)),
        Err(GameError::InsufficientDeposit)
    );

    assert_eq!(game.current_holder(), Some(&PLAYER1));
    assert_eq!(balance(&game, ETH, &PLAYER2), milli_ether(10_000));
}

#[test]
fn test_larger_usdc_deposit_takes_throne() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();
    play_with_usdc(&mut game, &PLAYER2, usdc(40)).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER2));
}

#[test]
fn test_usdc_at_or_below_one_and_a_half_is_rejected() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();

    game.custody_mut().approve(&PLAYER2, usdc(30));
    assert_eq!(
        game.deposit_secondary(&PLAYER2, usdc(29)),
        Err(GameError::InsufficientDeposit)
    );
    assert_eq!(
        game.deposit_secondary(&PLAYER2, usdc(30)),
        Err(GameError::InsufficientDeposit)
    );

    assert_eq!(game.current_holder(), Some(&PLAYER1));
    // Rejections consume no allowance
    assert_eq!(game.custody().allowance(&PLAYER2), usdc(30));
}

#[test]
fn test_ousted_ether_holder_gets_deposit_back() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();
    let before = balance(&game, ETH, &PLAYER1);

    play_with_ether(&mut game, &PLAYER2, milli_ether(2_000)).unwrap();

    assert_eq!(balance(&game, ETH, &PLAYER1) - before, milli_ether(1_000));
    assert_eq!(held(&game, ETH), milli_ether(2_000));
}

#[test]
fn test_ousted_usdc_holder_gets_deposit_back() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();
    let before = balance(&game, USDC, &PLAYER1);

    play_with_usdc(&mut game, &PLAYER2, usdc(40)).unwrap();

    assert_eq!(balance(&game, USDC, &PLAYER1) - before, usdc(20));
    assert_eq!(held(&game, USDC), usdc(40));
}

#[test]
fn test_usdc_outbids_ether_and_ether_is_returned() {
    let mut game = table();
    let eth_before = balance(&game, ETH, &PLAYER1);
    let usdc_before = balance(&game, USDC, &PLAYER1);

    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    // 1.6 ETH worth of USDC, rounded down
    let amount = 2_109_811_958;
    let coronation = play_with_usdc(&mut game, &PLAYER2, amount).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER2));
    assert_eq!(coronation.deposit.canonical_value, 1_599_999_999_463_552_889);
    // Paid back in ETH, the denomination player1 used
    assert_eq!(balance(&game, ETH, &PLAYER1), eth_before);
    assert_eq!(balance(&game, USDC, &PLAYER1), usdc_before);
    assert_eq!(held(&game, ETH), 0);
    assert_eq!(held(&game, USDC), amount);
}

#[test]
fn test_ether_outbids_usdc_and_usdc_is_returned() {
    let mut game = table();
    let usdc_before = balance(&game, USDC, &PLAYER1);

    play_with_usdc(&mut game, &PLAYER1, usdc(15)).unwrap();

    let amount = 31 * USDC_TO_WEI as u64;
    play_with_ether(&mut game, &PLAYER2, amount).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER2));
    assert_eq!(balance(&game, USDC, &PLAYER1), usdc_before);
    assert_eq!(held(&game, USDC), 0);
    assert_eq!(held(&game, ETH), amount);
}

#[test]
fn test_three_player_escalation() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(15)).unwrap();
    play_with_ether(&mut game, &PLAYER2, 31 * USDC_TO_WEI as u64).unwrap();

    let eth_before = balance(&game, ETH, &PLAYER2);
    let coronation = play_with_usdc(&mut game, &PLAYER3, usdc(47)).unwrap();

    assert_eq!(game.current_holder(), Some(&PLAYER3));
    assert_eq!(
        coronation.displaced.map(|(who, deposit)| (who, deposit.raw_amount)),
        Some((PLAYER2, 31 * USDC_TO_WEI as u64))
    );
    assert_eq!(balance(&game, ETH, &PLAYER2) - eth_before, 31 * USDC_TO_WEI as u64);
    assert_eq!(game.ledger().reigns(), 3);
}

#[test]
fn test_close_call() {
    // Roughly 15 USDC
    let player1_eth = 11_298_400_000_000_543;

    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, player1_eth).unwrap();

    // Exactly 1.5x in USDC, rounded down, is not enough
    assert_eq!(
        play_with_usdc(&mut game, &PLAYER2, 22_347_655),
        Err(GameError::InsufficientDeposit)
    );
    assert_eq!(game.minimum_to_dethrone(USDC), Ok(22_347_656));

    play_with_usdc(&mut game, &PLAYER2, 22_347_656).unwrap();
    assert_eq!(game.current_holder(), Some(&PLAYER2));
}

#[test]
fn test_king_cannot_play_again() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    assert_eq!(
        play_with_ether(&mut game, &PLAYER1, milli_ether(1_600)),
        Err(GameError::SelfPlay)
    );
    assert_eq!(
        play_with_usdc(&mut game, &PLAYER1, 2_109_811_958),
        Err(GameError::SelfPlay)
    );

    assert_eq!(held(&game, ETH), milli_ether(1_000));
    assert_eq!(held(&game, USDC), 0);
}

#[test]
fn test_unapproved_usdc_play_fails_cleanly() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();

    let result = game.deposit_secondary(&PLAYER2, usdc(10_000));
    assert!(matches!(result, Err(GameError::TransferFailure(_))));
    assert_eq!(game.current_holder(), Some(&PLAYER1));
    assert_eq!(balance(&game, USDC, &PLAYER2), usdc(100_000));
}

#[test]
fn test_failed_payout_rolls_back_the_play() {
    let mut game = table();
    play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)).unwrap();
    game.custody_mut().reject_sends_to(PLAYER1);

    let before = balance(&game, ETH, &PLAYER2);
    assert!(matches!(
        play_with_ether(&mut game, &PLAYER2, milli_ether(2_000)),
        Err(GameError::TransferFailure(_))
    ));

    assert_eq!(game.current_holder(), Some(&PLAYER1));
    assert_eq!(balance(&game, ETH, &PLAYER2), before);
    assert_eq!(held(&game, ETH), milli_ether(1_000));
    assert_eq!(game.ledger().reigns(), 1);
}

#[test]
fn test_rate_move_changes_the_bar() {
    let mut game = table();
    play_with_usdc(&mut game, &PLAYER1, usdc(20)).unwrap();

    // Token halves in value: the locked canonical value does not move, so
    // the challenger now needs twice as many tokens
    let before = game.minimum_to_dethrone(USDC).unwrap();
    game.oracle_mut().set_price(USDC_TO_WEI / 2);
    let after = game.minimum_to_dethrone(USDC).unwrap();

    assert!(after > before);
    assert_eq!(
        play_with_usdc(&mut game, &PLAYER2, usdc(31)),
        Err(GameError::InsufficientDeposit)
    );
    play_with_usdc(&mut game, &PLAYER2, after).unwrap();
}

#[test]
fn test_broken_feed_blocks_every_play() {
    let mut game = table();
    game.oracle_mut().set_price(0);

    assert_eq!(
        play_with_ether(&mut game, &PLAYER1, milli_ether(1_000)),
        Err(GameError::InvalidOracleData)
    );
    assert_eq!(game.current_holder(), None);
}

#[tokio::test]
async fn test_concurrent_players_see_one_order() {
    let game = SharedGame::new(table());

    let mut tasks = Vec::new();
    for (i, player) in [PLAYER1, PLAYER2, PLAYER3].into_iter().enumerate() {
        let game = game.clone();
        tasks.push(tokio::spawn(async move {
            // Doubling bids: whoever lands later with a bigger bid wins
            game.deposit(&player, ETH, milli_ether(1_000) << i)
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            accepted += 1;
        }
    }

    let holder = game.current_holder().unwrap();
    let reigns = game.with(|g| g.ledger().reigns());
    assert_eq!(reigns, accepted);
    let record = game.record().unwrap();
    assert_eq!(record.holder, holder);
    // Only the holder's deposit is still in custody
    assert_eq!(game.with(|g| g.custody().held(ETH)), record.raw_amount);
}
