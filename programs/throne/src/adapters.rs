//! Account-backed implementations of the game model's seams
//!
//! `FeedRateSource` reads the rate feed account, `ProgramCustody` moves
//! lamports and tokens between the accounts of a play instruction.

use crate::cpi::{system_transfer, token_transfer_as_throne};
use crate::token::{parse_token_account, TokenAccountHeader};
use kingmaker_common::borrow_account_data;
use kingmaker_oracle::{RateFeed, RoundAnswer};
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey};
use throne_model::{Custody, Denomination, GameError, Identity, RateSource, RoundData, TransferFailure};

pub fn round_data(answer: RoundAnswer) -> RoundData {
    RoundData {
        round_id: answer.round_id,
        price: i128::from(answer.price),
        decimals: answer.decimals,
        updated_at: answer.updated_at,
    }
}

/// Latest round of a feed account; only feeds owned by the rate feed
/// program are trusted
pub fn round_from_feed(owned_by_oracle: bool, feed: &RateFeed) -> Result<RoundData, GameError> {
    if !owned_by_oracle || !feed.validate() {
        return Err(GameError::InvalidOracleData);
    }
    Ok(round_data(feed.latest_round_data()))
}

/// A native pull needs the whole amount in the player's lamports
pub fn check_native_pull(balance: u64, amount: u64) -> Result<(), TransferFailure> {
    if balance < amount {
        return Err(TransferFailure::InsufficientFunds);
    }
    Ok(())
}

/// A token pull needs the balance first, then a delegation to `spender`
/// covering the amount
pub fn check_token_pull(
    header: &TokenAccountHeader,
    spender: &Pubkey,
    amount: u64,
) -> Result<(), TransferFailure> {
    if header.amount < amount {
        return Err(TransferFailure::InsufficientFunds);
    }
    if header.allowance_for(spender) < amount {
        return Err(TransferFailure::InsufficientAllowance);
    }
    Ok(())
}

/// New `(from, to)` lamport balances after moving `amount`
pub fn move_lamports(from: u64, to: u64, amount: u64) -> Result<(u64, u64), TransferFailure> {
    let debited = from
        .checked_sub(amount)
        .ok_or(TransferFailure::InsufficientFunds)?;
    let credited = to.checked_add(amount).ok_or(TransferFailure::Rejected)?;
    Ok((debited, credited))
}

pub struct FeedRateSource<'a> {
    feed: &'a AccountInfo,
}

impl<'a> FeedRateSource<'a> {
    pub fn new(feed: &'a AccountInfo) -> Self {
        Self { feed }
    }
}

impl RateSource for FeedRateSource<'_> {
    fn latest_round_data(&self) -> Result<RoundData, GameError> {
        let feed = unsafe { borrow_account_data::<RateFeed>(self.feed) }
            .map_err(|_| GameError::InvalidOracleData)?;
        round_from_feed(self.feed.is_owned_by(&kingmaker_oracle::ID), feed)
    }
}

/// Accounts a play may move funds between
pub struct PlayAccounts<'a> {
    pub throne: &'a AccountInfo,
    pub player: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub player_token: &'a AccountInfo,
    pub vault: &'a AccountInfo,
    pub prior_holder: &'a AccountInfo,
    pub prior_holder_token: &'a AccountInfo,
}

/// Custody held by the throne PDA
///
/// Native deposits sit in the throne account's lamports; token deposits sit
/// in the vault, which the throne PDA owns. A failed instruction is rolled
/// back by the runtime, so `unwind_pull` has nothing left to do.
pub struct ProgramCustody<'a> {
    accounts: PlayAccounts<'a>,
    bump: u8,
}

impl<'a> ProgramCustody<'a> {
    pub fn new(accounts: PlayAccounts<'a>, bump: u8) -> Self {
        Self { accounts, bump }
    }

    fn token_header(account: &AccountInfo) -> Result<TokenAccountHeader, TransferFailure> {
        let data = account
            .try_borrow_data()
            .map_err(|_| TransferFailure::Rejected)?;
        parse_token_account(&data).ok_or(TransferFailure::Rejected)
    }

    fn pull_native(&self, amount: u64) -> Result<(), TransferFailure> {
        let PlayAccounts {
            throne,
            player,
            system_program,
            ..
        } = self.accounts;
        check_native_pull(player.lamports(), amount)?;
        system_transfer(system_program, player, throne, amount).map_err(|_| {
            msg!("Error: Native transfer into custody failed");
            TransferFailure::Rejected
        })
    }

    fn pull_token(&self, amount: u64) -> Result<(), TransferFailure> {
        let PlayAccounts {
            throne,
            token_program,
            player_token,
            vault,
            ..
        } = self.accounts;
        let header = Self::token_header(player_token)?;
        check_token_pull(&header, throne.key(), amount)?;
        token_transfer_as_throne(token_program, player_token, vault, throne, self.bump, amount)
            .map_err(|_| {
                msg!("Error: Token transfer into custody failed");
                TransferFailure::Rejected
            })
    }

    fn send_native(&self, amount: u64) -> Result<(), TransferFailure> {
        let PlayAccounts {
            throne,
            prior_holder,
            ..
        } = self.accounts;
        let mut from = throne
            .try_borrow_mut_lamports()
            .map_err(|_| TransferFailure::Rejected)?;
        let mut to = prior_holder
            .try_borrow_mut_lamports()
            .map_err(|_| TransferFailure::Rejected)?;
        let (debited, credited) = move_lamports(*from, *to, amount)?;
        *from = debited;
        *to = credited;
        Ok(())
    }

    fn send_token(&self, amount: u64) -> Result<(), TransferFailure> {
        let PlayAccounts {
            throne,
            token_program,
            vault,
            prior_holder_token,
            ..
        } = self.accounts;
        token_transfer_as_throne(token_program, vault, prior_holder_token, throne, self.bump, amount)
            .map_err(|_| {
                msg!("Error: Token payout failed");
                TransferFailure::Rejected
            })
    }
}

impl Custody for ProgramCustody<'_> {
    fn pull(
        &mut self,
        denomination: Denomination,
        from: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        if self.accounts.player.key() != from {
            return Err(TransferFailure::Rejected);
        }
        match denomination {
            Denomination::Primary => self.pull_native(amount),
            Denomination::Secondary => self.pull_token(amount),
        }
    }

    fn send(
        &mut self,
        denomination: Denomination,
        to: &Identity,
        amount: u64,
    ) -> Result<(), TransferFailure> {
        if self.accounts.prior_holder.key() != to {
            return Err(TransferFailure::Rejected);
        }
        match denomination {
            Denomination::Primary => self.send_native(amount),
            Denomination::Secondary => self.send_token(amount),
        }
    }

    fn unwind_pull(&mut self, _denomination: Denomination, _from: &Identity, _amount: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRONE: Pubkey = [4; 32];

    fn player_token(amount: u64, delegate: Option<Pubkey>, delegated_amount: u64) -> TokenAccountHeader {
        TokenAccountHeader {
            mint: [3; 32],
            owner: [10; 32],
            amount,
            delegate,
            delegated_amount,
        }
    }

    #[test]
    fn test_feed_from_another_program_is_untrusted() {
        let feed = RateFeed::new([1; 32], 5_000_000, 9, 255);

        assert_eq!(
            round_from_feed(false, &feed),
            Err(GameError::InvalidOracleData)
        );
        assert_eq!(
            round_from_feed(true, &feed).map(|round| round.price),
            Ok(5_000_000)
        );
    }

    #[test]
    fn test_uninitialized_feed_is_untrusted() {
        let feed: RateFeed = unsafe { core::mem::zeroed() };
        assert_eq!(
            round_from_feed(true, &feed),
            Err(GameError::InvalidOracleData)
        );
    }

    #[test]
    fn test_native_pull_needs_balance() {
        assert_eq!(check_native_pull(1_000, 1_000), Ok(()));
        assert_eq!(
            check_native_pull(999, 1_000),
            Err(TransferFailure::InsufficientFunds)
        );
    }

    #[test]
    fn test_token_pull_checks_balance_before_allowance() {
        let approved = player_token(500, Some(THRONE), 500);
        assert_eq!(check_token_pull(&approved, &THRONE, 500), Ok(()));

        // Short on both: balance is reported
        let poor = player_token(100, None, 0);
        assert_eq!(
            check_token_pull(&poor, &THRONE, 500),
            Err(TransferFailure::InsufficientFunds)
        );

        let unapproved = player_token(500, None, 0);
        assert_eq!(
            check_token_pull(&unapproved, &THRONE, 500),
            Err(TransferFailure::InsufficientAllowance)
        );

        let wrong_delegate = player_token(500, Some([9; 32]), 500);
        assert_eq!(
            check_token_pull(&wrong_delegate, &THRONE, 500),
            Err(TransferFailure::InsufficientAllowance)
        );

        let under_approved = player_token(500, Some(THRONE), 499);
        assert_eq!(
            check_token_pull(&under_approved, &THRONE, 500),
            Err(TransferFailure::InsufficientAllowance)
        );
    }

    #[test]
    fn test_move_lamports() {
        assert_eq!(move_lamports(1_500, 20, 1_000), Ok((500, 1_020)));
        assert_eq!(
            move_lamports(999, 0, 1_000),
            Err(TransferFailure::InsufficientFunds)
        );
        assert_eq!(
            move_lamports(1_000, u64::MAX, 1),
            Err(TransferFailure::Rejected)
        );
    }

    #[test]
    fn test_round_data_widens_price() {
        let round = round_data(RoundAnswer {
            round_id: 4,
            price: -5,
            decimals: 18,
            updated_at: 1_700_000_000,
        });
        assert_eq!(
            round,
            RoundData {
                round_id: 4,
                price: -5,
                decimals: 18,
                updated_at: 1_700_000_000,
            }
        );
    }
}
