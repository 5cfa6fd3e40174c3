//! Rate lookup against the external price feed
//!
//! The feed prices ONE WHOLE unit of the secondary denomination in WHOLE
//! units of the primary denomination, scaled by `10^decimals`. A feed with
//! 18 decimals reporting `758_361_423_347_072` therefore says one token is
//! worth 0.000758361423347072 of the native asset.

use crate::error::GameError;

/// Latest answer of a rate feed together with its round metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u64,
    /// Signed, as feeds report it; only positive values are usable
    pub price: i128,
    pub decimals: u8,
    pub updated_at: i64,
}

/// External source of the secondary/primary exchange rate.
///
/// Read-only: implementations must not have side effects.
pub trait RateSource {
    fn latest_round_data(&self) -> Result<RoundData, GameError>;
}

impl<T: RateSource + ?Sized> RateSource for &T {
    fn latest_round_data(&self) -> Result<RoundData, GameError> {
        (**self).latest_round_data()
    }
}

/// A validated, strictly positive rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleRate {
    price: u128,
    decimals: u8,
}

impl OracleRate {
    /// Returns `None` for zero or negative prices
    pub fn new(price: i128, decimals: u8) -> Option<Self> {
        if price <= 0 {
            return None;
        }
        Some(Self {
            price: price as u128,
            decimals,
        })
    }

    pub fn price(&self) -> u128 {
        self.price
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

/// Queries the feed fresh on every call. No caching, no staleness window.
#[derive(Debug, Clone)]
pub struct PriceOracleAdapter<S> {
    source: S,
}

impl<S: RateSource> PriceOracleAdapter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn get_rate(&self) -> Result<OracleRate, GameError> {
        let round = self.source.latest_round_data()?;
        OracleRate::new(round.price, round.decimals).ok_or(GameError::InvalidOracleData)
    }
}
