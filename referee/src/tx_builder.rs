//! Instruction and transaction builders for the throne and rate feed programs

use crate::config::ChainKeys;
use anyhow::{Context, Result};
use kingmaker_oracle::entrypoint::OracleInstruction;
use kingmaker_throne::entrypoint::ThroneInstruction;
use kingmaker_throne::pda::THRONE_SEED;
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_program,
    transaction::Transaction,
};
use throne_model::Denomination;

pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::new_from_array(kingmaker_throne::token::TOKEN_PROGRAM_ID);

pub const ORACLE_PROGRAM_ID: Pubkey = Pubkey::new_from_array(kingmaker_oracle::ID);

/// Throne PDA and its bump
pub fn throne_address(throne_program: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[THRONE_SEED], throne_program)
}

/// Build the throne's Initialize instruction; the authority pays for the
/// throne account and must also operate the feed
pub fn build_initialize_instruction(
    throne_program: &Pubkey,
    authority: &Pubkey,
    oracle_feed: &Pubkey,
    secondary_mint: &Pubkey,
    vault: &Pubkey,
) -> Instruction {
    let (throne, bump) = throne_address(throne_program);

    Instruction {
        program_id: *throne_program,
        accounts: vec![
            AccountMeta::new(throne, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*oracle_feed, false),
            AccountMeta::new_readonly(*secondary_mint, false),
            AccountMeta::new_readonly(*vault, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: vec![ThroneInstruction::Initialize as u8, bump],
    }
}

/// Accounts of a play besides the program-derived and well-known ones
#[derive(Debug, Clone, Copy)]
pub struct PlayKeys {
    pub player: Pubkey,
    pub player_token: Pubkey,
    pub oracle_feed: Pubkey,
    pub vault: Pubkey,
    /// Current holder, or the player while the throne is empty
    pub prior_holder: Pubkey,
    pub prior_holder_token: Pubkey,
}

/// Build a PlayWithNative or PlayWithToken instruction
pub fn build_play_instruction(
    throne_program: &Pubkey,
    denomination: Denomination,
    keys: &PlayKeys,
    amount: u64,
) -> Instruction {
    let (throne, _) = throne_address(throne_program);
    let discriminator = match denomination {
        Denomination::Primary => ThroneInstruction::PlayWithNative,
        Denomination::Secondary => ThroneInstruction::PlayWithToken,
    } as u8;

    let mut data = Vec::with_capacity(9);
    data.push(discriminator);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: *throne_program,
        accounts: vec![
            AccountMeta::new(throne, false),
            AccountMeta::new(keys.player, true),
            AccountMeta::new_readonly(keys.oracle_feed, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new(keys.player_token, false),
            AccountMeta::new(keys.vault, false),
            AccountMeta::new(keys.prior_holder, false),
            AccountMeta::new(keys.prior_holder_token, false),
        ],
        data,
    }
}

/// Build the rate feed's UpdatePrice instruction
pub fn build_update_price_instruction(
    oracle_program: &Pubkey,
    feed: &Pubkey,
    authority: &Pubkey,
    price: i64,
) -> Instruction {
    let mut data = vec![OracleInstruction::UpdatePrice as u8];
    data.extend_from_slice(&price.to_le_bytes());

    Instruction {
        program_id: *oracle_program,
        accounts: vec![
            AccountMeta::new(*feed, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data,
    }
}

/// Signed transaction that publishes `rate_price` on the feed and then
/// initializes the throne against it, paid by the authority
///
/// The feed keeps the decimals it was created with, so it must have been
/// initialized with the scenario's rate decimals.
pub fn build_setup_transaction(
    keys: &ChainKeys,
    authority: &Keypair,
    rate_price: i64,
    recent_blockhash: Hash,
) -> Transaction {
    let update = build_update_price_instruction(
        &ORACLE_PROGRAM_ID,
        &keys.oracle_feed,
        &authority.pubkey(),
        rate_price,
    );
    let initialize = build_initialize_instruction(
        &keys.throne_program,
        &authority.pubkey(),
        &keys.oracle_feed,
        &keys.secondary_mint,
        &keys.vault,
    );

    Transaction::new_signed_with_payer(
        &[update, initialize],
        Some(&authority.pubkey()),
        &[authority],
        recent_blockhash,
    )
}

/// Wire form of a transaction, base58 encoded
pub fn encode_transaction(transaction: &Transaction) -> Result<String> {
    let bytes = bincode::serialize(transaction).context("Failed to serialize transaction")?;
    Ok(bs58::encode(bytes).into_string())
}
