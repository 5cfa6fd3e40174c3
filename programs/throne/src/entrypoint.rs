//! Throne program entrypoint

use kingmaker_common::KingmakerError;
#[cfg(feature = "bpf-entrypoint")]
use pinocchio::entrypoint;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};
use throne_model::Denomination;

use crate::instructions;

#[cfg(feature = "bpf-entrypoint")]
entrypoint!(process_instruction);

/// Throne instruction discriminators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroneInstruction {
    /// Create the throne for a rate feed and secondary mint
    Initialize = 0,

    /// Deposit lamports
    PlayWithNative = 1,

    /// Deposit tokens previously approved to the throne PDA
    PlayWithToken = 2,
}

impl ThroneInstruction {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Initialize),
            1 => Some(Self::PlayWithNative),
            2 => Some(Self::PlayWithToken),
            _ => None,
        }
    }
}

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let Some((&discriminator, data)) = instruction_data.split_first() else {
        msg!("Error: Instruction data is empty");
        return Err(KingmakerError::InvalidInstruction.into());
    };

    let Some(instruction) = ThroneInstruction::from_u8(discriminator) else {
        msg!("Error: Unknown instruction");
        return Err(KingmakerError::InvalidInstruction.into());
    };

    match instruction {
        ThroneInstruction::Initialize => {
            msg!("Instruction: Initialize");
            instructions::process_initialize(program_id, accounts, data)
        }
        ThroneInstruction::PlayWithNative => {
            msg!("Instruction: PlayWithNative");
            instructions::process_play(program_id, accounts, data, Denomination::Primary)
        }
        ThroneInstruction::PlayWithToken => {
            msg!("Instruction: PlayWithToken");
            instructions::process_play(program_id, accounts, data, Denomination::Secondary)
        }
    }
}
