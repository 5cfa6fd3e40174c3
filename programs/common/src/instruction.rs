//! Instruction data deserialization helpers
//!
//! All reads are bounds checked and little-endian; a short buffer is always
//! `InvalidInstruction`, never a panic.

use crate::error::KingmakerError;
use throne_model::Denomination;

#[inline]
fn span(data: &[u8], offset: usize, len: usize) -> Result<&[u8], KingmakerError> {
    let end = offset
        .checked_add(len)
        .ok_or(KingmakerError::InvalidInstruction)?;
    data.get(offset..end).ok_or(KingmakerError::InvalidInstruction)
}

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, KingmakerError> {
    data.get(offset)
        .copied()
        .ok_or(KingmakerError::InvalidInstruction)
}

/// Read a fixed-size byte array from instruction data
#[inline]
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], KingmakerError> {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(span(data, offset, N)?);
    Ok(bytes)
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, KingmakerError> {
    read_bytes::<8>(data, offset).map(u64::from_le_bytes)
}

/// Read an i64 (little-endian) from instruction data
#[inline]
pub fn read_i64(data: &[u8], offset: usize) -> Result<i64, KingmakerError> {
    read_bytes::<8>(data, offset).map(i64::from_le_bytes)
}

/// Read a denomination tag (0 = primary, 1 = secondary)
#[inline]
pub fn read_denomination(data: &[u8], offset: usize) -> Result<Denomination, KingmakerError> {
    Denomination::from_u8(read_u8(data, offset)?).ok_or(KingmakerError::InvalidInstruction)
}

/// Instruction data reader with tracked offset
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, KingmakerError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, KingmakerError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, KingmakerError> {
        let val = read_i64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], KingmakerError> {
        let val = read_bytes(self.data, self.offset)?;
        self.offset += N;
        Ok(val)
    }

    #[inline]
    pub fn read_denomination(&mut self) -> Result<Denomination, KingmakerError> {
        let val = read_denomination(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8() {
        let data = [42u8, 0, 0, 0];
        assert_eq!(read_u8(&data, 0).unwrap(), 42);
        assert!(read_u8(&data, 4).is_err());
    }

    #[test]
    fn test_read_u64() {
        let data = [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01];
        assert_eq!(read_u64(&data, 0).unwrap(), 0x0102030405060708);
        assert!(read_u64(&data, 1).is_err());
        assert!(read_u64(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_read_i64_negative() {
        let data = (-7i64).to_le_bytes();
        assert_eq!(read_i64(&data, 0).unwrap(), -7);
    }

    #[test]
    fn test_read_bytes() {
        let data = [1, 2, 3, 4, 5];
        let result: [u8; 3] = read_bytes(&data, 1).unwrap();
        assert_eq!(result, [2, 3, 4]);
        assert!(read_bytes::<4>(&data, 2).is_err());
    }

    #[test]
    fn test_read_denomination() {
        let data = [0u8, 1u8, 2u8];
        assert_eq!(read_denomination(&data, 0).unwrap(), Denomination::Primary);
        assert_eq!(read_denomination(&data, 1).unwrap(), Denomination::Secondary);
        assert_eq!(
            read_denomination(&data, 2),
            Err(KingmakerError::InvalidInstruction)
        );
    }

    #[test]
    fn test_instruction_reader() {
        let mut data = vec![6u8];
        data.extend_from_slice(&1_500_000u64.to_le_bytes());
        data.push(1);

        let mut reader = InstructionReader::new(&data);
        assert_eq!(reader.remaining(), 10);

        assert_eq!(reader.read_u8().unwrap(), 6);
        assert_eq!(reader.read_u64().unwrap(), 1_500_000);
        assert_eq!(reader.offset(), 9);
        assert_eq!(reader.read_denomination().unwrap(), Denomination::Secondary);
        assert_eq!(reader.remaining(), 0);

        assert!(reader.read_u8().is_err());
    }
}
