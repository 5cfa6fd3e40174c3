//! Account validation and zero-copy access

use crate::error::KingmakerError;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey};

/// Account must be owned by `owner`
pub fn validate_owner(account: &AccountInfo, owner: &Pubkey) -> Result<(), KingmakerError> {
    if !account.is_owned_by(owner) {
        msg!("Error: Account has wrong owner");
        return Err(KingmakerError::InvalidAccount);
    }
    Ok(())
}

pub fn validate_writable(account: &AccountInfo) -> Result<(), KingmakerError> {
    if !account.is_writable() {
        msg!("Error: Account must be writable");
        return Err(KingmakerError::InvalidAccount);
    }
    Ok(())
}

pub fn validate_signer(account: &AccountInfo) -> Result<(), KingmakerError> {
    if !account.is_signer() {
        msg!("Error: Account must be signer");
        return Err(KingmakerError::MissingSignature);
    }
    Ok(())
}

/// Account key must equal `expected`, otherwise `err`
pub fn validate_key(
    account: &AccountInfo,
    expected: &Pubkey,
    err: KingmakerError,
) -> Result<(), KingmakerError> {
    if account.key() != expected {
        return Err(err);
    }
    Ok(())
}

/// Reinterpret account data as `T`
///
/// # Safety
///
/// `T` must be `#[repr(C)]`, contain only plain-old-data fields with
/// alignment of at most 8, and no other borrow of the account data may be
/// alive while the returned reference is used.
pub unsafe fn borrow_account_data<T>(account: &AccountInfo) -> Result<&T, KingmakerError> {
    if account.data_len() < core::mem::size_of::<T>() {
        msg!("Error: Account data too small");
        return Err(KingmakerError::InvalidAccount);
    }
    let data = account.borrow_data_unchecked();
    Ok(&*(data.as_ptr() as *const T))
}

/// Reinterpret account data as `&mut T`
///
/// # Safety
///
/// Same requirements as [`borrow_account_data`].
pub unsafe fn borrow_account_data_mut<T>(
    account: &AccountInfo,
) -> Result<&mut T, KingmakerError> {
    if account.data_len() < core::mem::size_of::<T>() {
        msg!("Error: Account data too small");
        return Err(KingmakerError::InvalidAccount);
    }
    let data = account.borrow_mut_data_unchecked();
    Ok(&mut *(data.as_mut_ptr() as *mut T))
}
