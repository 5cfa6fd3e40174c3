//! Rate feed program entrypoint

use kingmaker_common::KingmakerError;
#[cfg(feature = "bpf-entrypoint")]
use pinocchio::entrypoint;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::instructions;

#[cfg(feature = "bpf-entrypoint")]
entrypoint!(process_instruction);

/// Rate feed instruction discriminators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleInstruction {
    /// Create a new rate feed
    Initialize = 0,

    /// Publish a new round (authority only)
    UpdatePrice = 1,
}

impl OracleInstruction {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Initialize),
            1 => Some(Self::UpdatePrice),
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

    let Some(instruction) = OracleInstruction::from_u8(discriminator) else {
        msg!("Error: Unknown instruction");
        return Err(KingmakerError::InvalidInstruction.into());
    };

    match instruction {
        OracleInstruction::Initialize => {
            msg!("Instruction: Initialize");
            instructions::process_initialize(program_id, accounts, data)
        }
        OracleInstruction::UpdatePrice => {
            msg!("Instruction: UpdatePrice");
            instructions::process_update_price(program_id, accounts, data)
        }
    }
}
