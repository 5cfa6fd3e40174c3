//! Claim the throne with a native or token deposit

use crate::adapters::{FeedRateSource, PlayAccounts, ProgramCustody};
use crate::state::Throne;
use crate::token::{parse_token_account, TokenAccountHeader, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use kingmaker_common::{
    borrow_account_data, borrow_account_data_mut, validate_key, validate_owner, validate_signer,
    validate_writable, InstructionReader, KingmakerError,
};
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};
use throne_model::{Denomination, GameController};

/// The accounts a play names for the displaced holder must be the ones the
/// locked deposit is paid back to
pub fn check_prior_holder(
    throne: &Throne,
    holder: &Pubkey,
    holder_token: Option<TokenAccountHeader>,
) -> Result<(), KingmakerError> {
    let Some(record) = throne.record() else {
        return Ok(());
    };
    if holder != &record.holder {
        msg!("Error: Prior holder account does not match the throne");
        return Err(KingmakerError::HolderMismatch);
    }
    if record.denomination == Denomination::Secondary {
        let matches = holder_token.is_some_and(|token| {
            token.owner == record.holder && token.mint == throne.secondary_mint
        });
        if !matches {
            msg!("Error: Prior holder token account does not match the throne");
            return Err(KingmakerError::HolderMismatch);
        }
    }
    Ok(())
}

/// Play for the throne
///
/// Accounts (same list for both denominations):
/// 0. `[writable]` Throne account
/// 1. `[signer, writable]` Player
/// 2. `[]` Rate feed
/// 3. `[]` System program
/// 4. `[]` Token program
/// 5. `[writable]` Player token account (secondary plays; delegate = throne)
/// 6. `[writable]` Vault
/// 7. `[writable]` Prior holder (any account while the throne is empty)
/// 8. `[writable]` Prior holder token account
///
/// Instruction data:
/// - amount: u64 (8 bytes), raw units of `denomination`
pub fn process_play(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
    denomination: Denomination,
) -> ProgramResult {
    let [throne_account, player, oracle_feed, system_program, token_program, player_token, vault, prior_holder, prior_holder_token, ..] =
        accounts
    else {
        msg!("Error: Play requires 9 accounts");
        return Err(KingmakerError::InvalidAccount.into());
    };

    validate_signer(player)?;
    validate_writable(player)?;
    validate_writable(throne_account)?;
    validate_owner(throne_account, program_id)?;

    let amount = InstructionReader::new(data).read_u64()?;

    let throne = unsafe { *borrow_account_data::<Throne>(throne_account)? };
    if !throne.validate() {
        msg!("Error: Throne is not initialized");
        return Err(KingmakerError::NotInitialized.into());
    }

    validate_key(oracle_feed, &throne.oracle, KingmakerError::ConfigMismatch)?;
    validate_key(vault, &throne.vault, KingmakerError::ConfigMismatch)?;
    validate_key(system_program, &SYSTEM_PROGRAM_ID, KingmakerError::InvalidAccount)?;
    validate_key(token_program, &TOKEN_PROGRAM_ID, KingmakerError::InvalidAccount)?;

    if denomination == Denomination::Secondary {
        let owned_by_player = parse_token_account(&player_token.try_borrow_data()?)
            .is_some_and(|token| {
                &token.owner == player.key() && token.mint == throne.secondary_mint
            });
        if !owned_by_player {
            msg!("Error: Player token account must hold the secondary mint");
            return Err(KingmakerError::InvalidAccount.into());
        }
    }

    if throne.current_holder().is_some() {
        validate_writable(prior_holder)?;
        validate_writable(prior_holder_token)?;
        let holder_token = parse_token_account(&prior_holder_token.try_borrow_data()?);
        check_prior_holder(&throne, prior_holder.key(), holder_token)?;
    }

    let custody = ProgramCustody::new(
        PlayAccounts {
            throne: throne_account,
            player,
            system_program,
            token_program,
            player_token,
            vault,
            prior_holder,
            prior_holder_token,
        },
        throne.bump,
    );
    let mut game = GameController::with_ledger(
        FeedRateSource::new(oracle_feed),
        custody,
        throne.scales(),
        throne.ledger(),
    );

    let coronation = game
        .deposit(player.key(), denomination, amount)
        .map_err(KingmakerError::from)?;

    let stored = unsafe { borrow_account_data_mut::<Throne>(throne_account)? };
    stored.store(game.ledger());

    pinocchio_log::log!(
        "Reign {}: deposit {} canonical {}",
        stored.reigns,
        amount,
        coronation.deposit.canonical_value
    );
    Ok(())
}
