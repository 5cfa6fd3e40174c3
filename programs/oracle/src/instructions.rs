//! Rate feed instruction handlers

use crate::state::{RateFeed, RATE_FEED_SIZE};
use kingmaker_common::{
    borrow_account_data_mut, validate_owner, validate_signer, validate_writable,
    InstructionReader, KingmakerError,
};
use pinocchio::{
    account_info::AccountInfo,
    msg,
    pubkey::Pubkey,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};

/// Initialize a new rate feed
///
/// Accounts:
/// 0. `[writable]` Feed account (owned by this program)
/// 1. `[signer]` Authority
///
/// Instruction data:
/// - initial_price: i64 (8 bytes)
/// - decimals: u8 (1 byte)
/// - bump: u8 (1 byte)
pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [feed_account, authority_account, ..] = accounts else {
        msg!("Error: Initialize requires 2 accounts");
        return Err(KingmakerError::InvalidAccount.into());
    };

    validate_signer(authority_account)?;
    validate_writable(feed_account)?;
    validate_owner(feed_account, program_id)?;

    if feed_account.data_len() < RATE_FEED_SIZE {
        msg!("Error: Feed account too small");
        return Err(KingmakerError::InvalidAccount.into());
    }

    let mut reader = InstructionReader::new(data);
    let initial_price = reader.read_i64()?;
    let decimals = reader.read_u8()?;
    let bump = reader.read_u8()?;

    let feed = unsafe { borrow_account_data_mut::<RateFeed>(feed_account)? };
    if feed.validate() {
        msg!("Error: Feed already initialized");
        return Err(KingmakerError::AlreadyInitialized.into());
    }

    *feed = RateFeed::new(*authority_account.key(), initial_price, decimals, bump);

    msg!("Rate feed initialized");
    Ok(())
}

/// Publish a new round
///
/// Accounts:
/// 0. `[writable]` Feed account
/// 1. `[signer]` Authority
///
/// Instruction data:
/// - price: i64 (8 bytes)
pub fn process_update_price(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [feed_account, authority_account, ..] = accounts else {
        msg!("Error: UpdatePrice requires 2 accounts");
        return Err(KingmakerError::InvalidAccount.into());
    };

    validate_signer(authority_account)?;
    validate_writable(feed_account)?;
    validate_owner(feed_account, program_id)?;

    let price = InstructionReader::new(data).read_i64()?;

    let timestamp = Clock::get()?.unix_timestamp;

    let feed = unsafe { borrow_account_data_mut::<RateFeed>(feed_account)? };
    if !feed.validate() {
        msg!("Error: Invalid feed account");
        return Err(KingmakerError::NotInitialized.into());
    }
    if feed.authority != *authority_account.key() {
        msg!("Error: Invalid authority");
        return Err(KingmakerError::InvalidAccount.into());
    }

    feed.update_price(price, timestamp);

    pinocchio_log::log!("Round {} price {}", feed.round_id, price);
    Ok(())
}
