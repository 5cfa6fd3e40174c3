//! Create the throne for a given rate feed and secondary mint

use crate::adapters::round_from_feed;
use crate::cpi::{allocate_and_assign_throne, create_throne_account, system_transfer};
use crate::pda::verify_throne_address;
use crate::state::Throne;
use crate::token::{mint_decimals, parse_token_account, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use kingmaker_common::{
    borrow_account_data, borrow_account_data_mut, validate_key, validate_owner, validate_signer,
    validate_writable, InstructionReader, KingmakerError,
};
use kingmaker_oracle::RateFeed;
use pinocchio::{
    account_info::AccountInfo,
    msg,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};

/// How the throne address gets its account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroneCreation {
    /// Already allocated; must be owned by this program
    Existing,
    /// Nothing at the address: one `CreateAccount`
    Create { lamports: u64 },
    /// Lamports were sent to the address beforehand: top up to rent
    /// exemption, then allocate and assign
    Adopt { top_up: u64 },
}

pub fn plan_creation(
    owned_by_system: bool,
    data_len: usize,
    lamports: u64,
    rent_exempt: u64,
) -> ThroneCreation {
    if !owned_by_system || data_len != 0 {
        return ThroneCreation::Existing;
    }
    if lamports == 0 {
        ThroneCreation::Create {
            lamports: rent_exempt,
        }
    } else {
        ThroneCreation::Adopt {
            top_up: rent_exempt.saturating_sub(lamports),
        }
    }
}

/// The feed must come from the rate feed program and be operated by the
/// authority starting the game
pub fn check_feed(
    owned_by_oracle: bool,
    feed: &RateFeed,
    authority: &Pubkey,
) -> Result<(), KingmakerError> {
    if round_from_feed(owned_by_oracle, feed).is_err() {
        msg!("Error: Rate feed is not an initialized feed of the rate feed program");
        return Err(KingmakerError::InvalidAccount);
    }
    if &feed.authority != authority {
        msg!("Error: Rate feed is operated by another authority");
        return Err(KingmakerError::ConfigMismatch);
    }
    Ok(())
}

/// Initialize the throne
///
/// Accounts:
/// 0. `[writable]` Throne account (PDA ["throne"]; created here when empty)
/// 1. `[signer, writable]` Authority, pays for the throne account
/// 2. `[]` Rate feed (owned by the rate feed program, same authority)
/// 3. `[]` Secondary mint
/// 4. `[]` Vault token account (mint = secondary mint, owner = throne PDA)
/// 5. `[]` System program
///
/// Instruction data:
/// - bump: u8 (1 byte)
pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [throne_account, authority, oracle_feed, secondary_mint, vault, system_program, ..] =
        accounts
    else {
        msg!("Error: Initialize requires 6 accounts");
        return Err(KingmakerError::InvalidAccount.into());
    };

    validate_signer(authority)?;
    validate_writable(authority)?;
    validate_writable(throne_account)?;
    validate_key(system_program, &SYSTEM_PROGRAM_ID, KingmakerError::InvalidAccount)?;

    let bump = InstructionReader::new(data).read_u8()?;
    verify_throne_address(program_id, throne_account.key(), bump)?;

    let feed = unsafe { borrow_account_data::<RateFeed>(oracle_feed)? };
    check_feed(
        oracle_feed.is_owned_by(&kingmaker_oracle::ID),
        feed,
        authority.key(),
    )?;

    validate_owner(secondary_mint, &TOKEN_PROGRAM_ID)?;
    let Some(secondary_decimals) = mint_decimals(&secondary_mint.try_borrow_data()?) else {
        msg!("Error: Invalid secondary mint");
        return Err(KingmakerError::InvalidAccount.into());
    };

    validate_owner(vault, &TOKEN_PROGRAM_ID)?;
    let vault_ok = parse_token_account(&vault.try_borrow_data()?).is_some_and(|header| {
        &header.mint == secondary_mint.key() && &header.owner == throne_account.key()
    });
    if !vault_ok {
        msg!("Error: Vault must hold the secondary mint and belong to the throne");
        return Err(KingmakerError::InvalidAccount.into());
    }

    let space = Throne::LEN as u64;
    let creation = plan_creation(
        throne_account.is_owned_by(&SYSTEM_PROGRAM_ID),
        throne_account.data_len(),
        throne_account.lamports(),
        Rent::get()?.minimum_balance(Throne::LEN),
    );
    match creation {
        ThroneCreation::Existing => {}
        ThroneCreation::Create { lamports } => {
            create_throne_account(
                system_program,
                authority,
                throne_account,
                bump,
                lamports,
                space,
                program_id,
            )?;
        }
        ThroneCreation::Adopt { top_up } => {
            if top_up > 0 {
                system_transfer(system_program, authority, throne_account, top_up)?;
            }
            allocate_and_assign_throne(system_program, throne_account, bump, space, program_id)?;
        }
    }
    validate_owner(throne_account, program_id)?;

    let throne = unsafe { borrow_account_data_mut::<Throne>(throne_account)? };
    if throne.validate() {
        msg!("Error: Throne already initialized");
        return Err(KingmakerError::AlreadyInitialized.into());
    }

    *throne = Throne::new(
        *authority.key(),
        *oracle_feed.key(),
        *secondary_mint.key(),
        *vault.key(),
        secondary_decimals,
        bump,
    );

    pinocchio_log::log!("Throne initialized, secondary decimals {}", secondary_decimals);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORITY: Pubkey = [1; 32];
    const RENT: u64 = 2_561_280;

    #[test]
    fn test_empty_address_is_created() {
        assert_eq!(
            plan_creation(true, 0, 0, RENT),
            ThroneCreation::Create { lamports: RENT }
        );
    }

    #[test]
    fn test_prefunded_address_is_adopted() {
        assert_eq!(
            plan_creation(true, 0, 1_000, RENT),
            ThroneCreation::Adopt {
                top_up: RENT - 1_000
            }
        );
        assert_eq!(
            plan_creation(true, 0, RENT * 2, RENT),
            ThroneCreation::Adopt { top_up: 0 }
        );
    }

    #[test]
    fn test_allocated_account_is_left_alone() {
        assert_eq!(
            plan_creation(false, Throne::LEN, RENT, RENT),
            ThroneCreation::Existing
        );
        // Owned by someone else: the owner check rejects it afterwards
        assert_eq!(plan_creation(false, 0, 0, RENT), ThroneCreation::Existing);
    }

    #[test]
    fn test_feed_must_be_owned_by_the_feed_program() {
        let feed = RateFeed::new(AUTHORITY, 758_361_423_347_072, 18, 255);

        assert_eq!(check_feed(true, &feed, &AUTHORITY), Ok(()));
        assert_eq!(
            check_feed(false, &feed, &AUTHORITY),
            Err(KingmakerError::InvalidAccount)
        );
    }

    #[test]
    fn test_feed_must_share_the_authority() {
        let feed = RateFeed::new([2; 32], 758_361_423_347_072, 18, 255);

        assert_eq!(
            check_feed(true, &feed, &AUTHORITY),
            Err(KingmakerError::ConfigMismatch)
        );
    }

    #[test]
    fn test_uninitialized_feed_is_rejected() {
        let feed: RateFeed = unsafe { core::mem::zeroed() };

        assert_eq!(
            check_feed(true, &feed, &AUTHORITY),
            Err(KingmakerError::InvalidAccount)
        );
    }
}
