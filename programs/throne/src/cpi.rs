//! Cross-program invocations into the System and SPL Token programs

use crate::pda::THRONE_SEED;
use crate::token::{
    allocate_data, assign_data, create_account_data, system_transfer_data, token_transfer_data,
};
use pinocchio::{
    account_info::AccountInfo,
    cpi::{invoke, invoke_signed},
    instruction::{AccountMeta, Instruction, Seed, Signer},
    pubkey::Pubkey,
    ProgramResult,
};

/// Move lamports out of a system-owned signer
pub fn system_transfer(
    system_program: &AccountInfo,
    from: &AccountInfo,
    to: &AccountInfo,
    lamports: u64,
) -> ProgramResult {
    let data = system_transfer_data(lamports);
    let metas = [
        AccountMeta::writable_signer(from.key()),
        AccountMeta::writable(to.key()),
    ];
    let instruction = Instruction {
        program_id: system_program.key(),
        accounts: &metas,
        data: &data,
    };
    invoke(&instruction, &[from, to])
}

/// SPL `Transfer` with the throne PDA as authority, either as owner of the
/// vault or as approved delegate of a player's account
pub fn token_transfer_as_throne(
    token_program: &AccountInfo,
    source: &AccountInfo,
    destination: &AccountInfo,
    throne: &AccountInfo,
    bump: u8,
    amount: u64,
) -> ProgramResult {
    let data = token_transfer_data(amount);
    let metas = [
        AccountMeta::writable(source.key()),
        AccountMeta::writable(destination.key()),
        AccountMeta::readonly_signer(throne.key()),
    ];
    let instruction = Instruction {
        program_id: token_program.key(),
        accounts: &metas,
        data: &data,
    };

    let bump_seed = [bump];
    let seeds = [Seed::from(THRONE_SEED), Seed::from(&bump_seed[..])];
    let signer = Signer::from(&seeds);
    invoke_signed(&instruction, &[source, destination, throne], &[signer])
}

/// `CreateAccount` for the throne PDA, funded by `payer`
pub fn create_throne_account(
    system_program: &AccountInfo,
    payer: &AccountInfo,
    throne: &AccountInfo,
    bump: u8,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> ProgramResult {
    let data = create_account_data(lamports, space, owner);
    let metas = [
        AccountMeta::writable_signer(payer.key()),
        AccountMeta::writable_signer(throne.key()),
    ];
    let instruction = Instruction {
        program_id: system_program.key(),
        accounts: &metas,
        data: &data,
    };

    let bump_seed = [bump];
    let seeds = [Seed::from(THRONE_SEED), Seed::from(&bump_seed[..])];
    let signer = Signer::from(&seeds);
    invoke_signed(&instruction, &[payer, throne], &[signer])
}

/// `Allocate` then `Assign` for a throne PDA that already holds lamports,
/// where `CreateAccount` would be refused
pub fn allocate_and_assign_throne(
    system_program: &AccountInfo,
    throne: &AccountInfo,
    bump: u8,
    space: u64,
    owner: &Pubkey,
) -> ProgramResult {
    let metas = [AccountMeta::writable_signer(throne.key())];
    let bump_seed = [bump];
    let seeds = [Seed::from(THRONE_SEED), Seed::from(&bump_seed[..])];

    let data = allocate_data(space);
    let allocate = Instruction {
        program_id: system_program.key(),
        accounts: &metas,
        data: &data,
    };
    invoke_signed(&allocate, &[throne], &[Signer::from(&seeds)])?;

    let data = assign_data(owner);
    let assign = Instruction {
        program_id: system_program.key(),
        accounts: &metas,
        data: &data,
    };
    invoke_signed(&assign, &[throne], &[Signer::from(&seeds)])
}
