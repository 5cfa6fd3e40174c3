//! Program error codes

use pinocchio::program_error::ProgramError;
use throne_model::GameError;

/// Custom program errors, surfaced as `ProgramError::Custom(code)`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingmakerError {
    InvalidInstruction = 0,
    InvalidAccount = 1,
    MissingSignature = 2,
    AlreadyInitialized = 3,
    NotInitialized = 4,
    /// Prior-holder accounts do not match the recorded holder
    HolderMismatch = 5,
    /// Oracle feed or mint differs from the one the throne was created with
    ConfigMismatch = 6,

    InvalidOracleData = 100,
    InsufficientDeposit = 101,
    SelfPlay = 102,
    InvalidAmount = 103,
    TransferFailure = 104,
    ArithmeticOverflow = 105,
}

impl KingmakerError {
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl From<KingmakerError> for ProgramError {
    fn from(e: KingmakerError) -> Self {
        ProgramError::Custom(e.code())
    }
}

impl From<GameError> for KingmakerError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::InvalidOracleData => KingmakerError::InvalidOracleData,
            GameError::InsufficientDeposit => KingmakerError::InsufficientDeposit,
            GameError::SelfPlay => KingmakerError::SelfPlay,
            GameError::InvalidAmount => KingmakerError::InvalidAmount,
            GameError::TransferFailure(_) => KingmakerError::TransferFailure,
            GameError::ArithmeticOverflow => KingmakerError::ArithmeticOverflow,
        }
    }
}
