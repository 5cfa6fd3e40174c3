//! Settlement errors

use thiserror::Error;

/// Why a transfer into or out of custody did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransferFailure {
    /// Sender does not hold the amount
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Sender has not approved custody for the amount
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// Token service or recipient refused the transfer
    #[error("transfer rejected")]
    Rejected,
}

/// Every way a deposit can be turned away.
///
/// None of these leave the game unusable: the throne and all balances are
/// exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("oracle returned a non-positive price")]
    InvalidOracleData,
    #[error("deposit does not exceed 1.5x the current holder's value")]
    InsufficientDeposit,
    #[error("caller already holds the throne")]
    SelfPlay,
    #[error("deposit amount must be positive")]
    InvalidAmount,
    #[error("transfer failed: {0}")]
    TransferFailure(#[from] TransferFailure),
    #[error("arithmetic overflow while normalizing")]
    ArithmeticOverflow,
}
