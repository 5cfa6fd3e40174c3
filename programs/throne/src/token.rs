//! SPL Token and System program layouts used by the throne
//!
//! Only the handful of fields and instructions the game touches.

use pinocchio::pubkey::Pubkey;

pub const TOKEN_PROGRAM_ID: Pubkey = pinocchio_pubkey::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const SYSTEM_PROGRAM_ID: Pubkey = [0; 32];

/// Token account: mint (32) | owner (32) | amount (8) | delegate (36) |
/// state (1) | is_native (12) | delegated_amount (8) | close_authority (36)
pub const TOKEN_ACCOUNT_LEN: usize = 165;
const DELEGATE_OFFSET: usize = 72;
const DELEGATED_AMOUNT_OFFSET: usize = 121;

/// Mint: mint_authority (36) | supply (8) | decimals (1) | ...
pub const MINT_LEN: usize = 82;
const MINT_DECIMALS_OFFSET: usize = 44;

const TOKEN_TRANSFER: u8 = 3;
const SYSTEM_CREATE_ACCOUNT: u32 = 0;
const SYSTEM_ASSIGN: u32 = 1;
const SYSTEM_TRANSFER: u32 = 2;
const SYSTEM_ALLOCATE: u32 = 8;

/// The parts of a token account the game checks before moving funds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountHeader {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
}

impl TokenAccountHeader {
    /// How much `spender` may move out of this account
    pub fn allowance_for(&self, spender: &Pubkey) -> u64 {
        match &self.delegate {
            Some(delegate) if delegate == spender => self.delegated_amount,
            _ => 0,
        }
    }
}

pub fn parse_token_account(data: &[u8]) -> Option<TokenAccountHeader> {
    if data.len() != TOKEN_ACCOUNT_LEN {
        return None;
    }
    let mint: Pubkey = data[0..32].try_into().ok()?;
    let owner: Pubkey = data[32..64].try_into().ok()?;
    let amount = u64::from_le_bytes(data[64..72].try_into().ok()?);
    let delegate = match data[DELEGATE_OFFSET] {
        0 => None,
        _ => Some(data[DELEGATE_OFFSET + 4..DELEGATE_OFFSET + 36].try_into().ok()?),
    };
    let delegated_amount = u64::from_le_bytes(
        data[DELEGATED_AMOUNT_OFFSET..DELEGATED_AMOUNT_OFFSET + 8]
            .try_into()
            .ok()?,
    );
    Some(TokenAccountHeader {
        mint,
        owner,
        amount,
        delegate,
        delegated_amount,
    })
}

pub fn mint_decimals(data: &[u8]) -> Option<u8> {
    if data.len() != MINT_LEN {
        return None;
    }
    data.get(MINT_DECIMALS_OFFSET).copied()
}

/// SPL Token `Transfer` instruction data
pub fn token_transfer_data(amount: u64) -> [u8; 9] {
    let mut data = [0u8; 9];
    data[0] = TOKEN_TRANSFER;
    data[1..].copy_from_slice(&amount.to_le_bytes());
    data
}

/// System program `Transfer` instruction data
pub fn system_transfer_data(lamports: u64) -> [u8; 12] {
    let mut data = [0u8; 12];
    data[..4].copy_from_slice(&SYSTEM_TRANSFER.to_le_bytes());
    data[4..].copy_from_slice(&lamports.to_le_bytes());
    data
}

/// System program `CreateAccount` instruction data
pub fn create_account_data(lamports: u64, space: u64, owner: &Pubkey) -> [u8; 52] {
    let mut data = [0u8; 52];
    data[..4].copy_from_slice(&SYSTEM_CREATE_ACCOUNT.to_le_bytes());
    data[4..12].copy_from_slice(&lamports.to_le_bytes());
    data[12..20].copy_from_slice(&space.to_le_bytes());
    data[20..].copy_from_slice(owner);
    data
}

/// System program `Allocate` instruction data
pub fn allocate_data(space: u64) -> [u8; 12] {
    let mut data = [0u8; 12];
    data[..4].copy_from_slice(&SYSTEM_ALLOCATE.to_le_bytes());
    data[4..].copy_from_slice(&space.to_le_bytes());
    data
}

/// System program `Assign` instruction data
pub fn assign_data(owner: &Pubkey) -> [u8; 36] {
    let mut data = [0u8; 36];
    data[..4].copy_from_slice(&SYSTEM_ASSIGN.to_le_bytes());
    data[4..].copy_from_slice(owner);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_account() {
        let mut data = [0u8; TOKEN_ACCOUNT_LEN];
        data[0..32].copy_from_slice(&[7; 32]);
        data[32..64].copy_from_slice(&[9; 32]);
        data[64..72].copy_from_slice(&20_000_000u64.to_le_bytes());

        let header = parse_token_account(&data).unwrap();
        assert_eq!(header.mint, [7; 32]);
        assert_eq!(header.owner, [9; 32]);
        assert_eq!(header.amount, 20_000_000);
        assert_eq!(header.delegate, None);
        assert_eq!(header.allowance_for(&[5; 32]), 0);

        assert_eq!(parse_token_account(&data[..100]), None);
    }

    #[test]
    fn test_delegate_allowance() {
        let mut data = [0u8; TOKEN_ACCOUNT_LEN];
        data[72] = 1;
        data[76..108].copy_from_slice(&[5; 32]);
        data[121..129].copy_from_slice(&700u64.to_le_bytes());

        let header = parse_token_account(&data).unwrap();
        assert_eq!(header.delegate, Some([5; 32]));
        assert_eq!(header.allowance_for(&[5; 32]), 700);
        assert_eq!(header.allowance_for(&[6; 32]), 0);
    }

    #[test]
    fn test_mint_decimals() {
        let mut data = [0u8; MINT_LEN];
        data[44] = 6;
        assert_eq!(mint_decimals(&data), Some(6));
        assert_eq!(mint_decimals(&data[..44]), None);
    }

    #[test]
    fn test_instruction_data_layouts() {
        assert_eq!(
            token_transfer_data(0x0102),
            [3, 0x02, 0x01, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            system_transfer_data(5),
            [2, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_account_creation_data_layouts() {
        let owner = [7u8; 32];

        let create = create_account_data(1_002_240, 240, &owner);
        assert_eq!(create[..4], [0, 0, 0, 0]);
        assert_eq!(create[4..12], 1_002_240u64.to_le_bytes());
        assert_eq!(create[12..20], 240u64.to_le_bytes());
        assert_eq!(create[20..], owner);

        assert_eq!(
            allocate_data(240),
            [8, 0, 0, 0, 240, 0, 0, 0, 0, 0, 0, 0]
        );

        let assign = assign_data(&owner);
        assert_eq!(assign[..4], [1, 0, 0, 0]);
        assert_eq!(assign[4..], owner);
    }
}
