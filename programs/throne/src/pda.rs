//! Program-derived addresses

use kingmaker_common::KingmakerError;
use pinocchio::{msg, pubkey::Pubkey};

/// Seed of the throne account, which also custodies native deposits and
/// owns the token vault
pub const THRONE_SEED: &[u8] = b"throne";

/// `key` must be the throne PDA for `bump`
pub fn verify_throne_address(
    program_id: &Pubkey,
    key: &Pubkey,
    bump: u8,
) -> Result<(), KingmakerError> {
    let bump_seed = [bump];
    let derived = pinocchio::pubkey::create_program_address(&[THRONE_SEED, &bump_seed[..]], program_id)
        .map_err(|_| KingmakerError::InvalidAccount)?;
    if &derived != key {
        msg!("Error: Throne account is not the program address");
        return Err(KingmakerError::InvalidAccount);
    }
    Ok(())
}
