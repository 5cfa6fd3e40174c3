//! Conversion of raw deposits into the canonical unit
//!
//! The canonical unit is the primary denomination's base unit. Secondary
//! amounts are converted with
//!
//! ```text
//! canonical = floor(raw * price * 10^primary_decimals
//!                   / (10^secondary_decimals * 10^rate_decimals))
//! ```
//!
//! Powers of ten are netted into one exponent before anything is multiplied,
//! the multiplication happens before the division, and everything runs in
//! u128 with checked arithmetic. Rounding is always floor.

use crate::denomination::{Denomination, DenominationScales};
use crate::error::GameError;
use crate::oracle::OracleRate;

/// 10^exp, or None once it no longer fits in u128
pub fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

fn ceil_div(a: u128, b: u128) -> u128 {
    a / b + u128::from(a % b != 0)
}

/// Net power-of-ten adjustment applied to `raw * price`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scaling {
    Multiply(u32),
    Divide(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueNormalizer {
    scales: DenominationScales,
}

impl ValueNormalizer {
    pub fn new(scales: DenominationScales) -> Self {
        Self { scales }
    }

    pub fn scales(&self) -> DenominationScales {
        self.scales
    }

    fn scaling(&self, rate: &OracleRate) -> Scaling {
        let up = u32::from(self.scales.primary_decimals);
        let down = u32::from(self.scales.secondary_decimals) + u32::from(rate.decimals());
        if up >= down {
            Scaling::Multiply(up - down)
        } else {
            Scaling::Divide(down - up)
        }
    }

    /// Canonical value of `raw_amount` units of `denomination`
    pub fn canonical_value(
        &self,
        denomination: Denomination,
        raw_amount: u64,
        rate: &OracleRate,
    ) -> Result<u128, GameError> {
        if denomination == Denomination::Primary {
            return Ok(u128::from(raw_amount));
        }

        let value = u128::from(raw_amount)
            .checked_mul(rate.price())
            .ok_or(GameError::ArithmeticOverflow)?;

        match self.scaling(rate) {
            Scaling::Multiply(exp) => pow10(exp)
                .and_then(|factor| value.checked_mul(factor))
                .ok_or(GameError::ArithmeticOverflow),
            // A divisor past u128 range floors every representable value to zero
            Scaling::Divide(exp) => Ok(pow10(exp).map_or(0, |divisor| value / divisor)),
        }
    }

    /// Smallest raw amount of `denomination` whose canonical value is
    /// strictly greater than `target`.
    ///
    /// Fails with `ArithmeticOverflow` when no u64 amount gets there.
    pub fn smallest_raw_exceeding(
        &self,
        denomination: Denomination,
        target: u128,
        rate: &OracleRate,
    ) -> Result<u64, GameError> {
        let needed = target.checked_add(1).ok_or(GameError::ArithmeticOverflow)?;

        let raw = match denomination {
            Denomination::Primary => needed,
            Denomination::Secondary => match self.scaling(rate) {
                // floor(raw * p / D) >= needed  <=>  raw * p >= needed * D
                Scaling::Divide(exp) => {
                    let divisor = pow10(exp).ok_or(GameError::ArithmeticOverflow)?;
                    let scaled = needed
                        .checked_mul(divisor)
                        .ok_or(GameError::ArithmeticOverflow)?;
                    ceil_div(scaled, rate.price())
                }
                // raw * p * M >= needed
                Scaling::Multiply(exp) => {
                    let per_unit = pow10(exp)
                        .and_then(|factor| rate.price().checked_mul(factor))
                        .ok_or(GameError::ArithmeticOverflow)?;
                    ceil_div(needed, per_unit)
                }
            },
        };

        u64::try_from(raw).map_err(|_| GameError::ArithmeticOverflow)
    }
}
