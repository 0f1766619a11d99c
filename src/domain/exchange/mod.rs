//! Exchange domain — statistics rows for the exchanges table.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated exchange row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: String,
    pub name: String,
    pub year_established: Option<u32>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub has_trading_incentive: bool,
    /// Provider trust score, 1..=10.
    pub trust_score: Option<u32>,
    pub trust_score_rank: Option<u32>,
    pub trade_volume_24h_btc: f64,
    pub trade_volume_24h_btc_normalized: f64,
}

impl Exchange {
    /// Share of reported volume that survives normalization, in `[0, 1]`.
    pub fn normalized_ratio(&self) -> Option<f64> {
        (self.trade_volume_24h_btc > 0.0)
            .then(|| (self.trade_volume_24h_btc_normalized / self.trade_volume_24h_btc).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeValidationError {
    MissingId,
    MissingName(String),
}

impl fmt::Display for ExchangeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeValidationError::MissingId => write!(f, "Exchange missing id"),
            ExchangeValidationError::MissingName(id) => write!(f, "Exchange {} missing name", id),
        }
    }
}

impl std::error::Error for ExchangeValidationError {}

impl TryFrom<wire::ExchangeResponse> for Exchange {
    type Error = ExchangeValidationError;

    fn try_from(source: wire::ExchangeResponse) -> Result<Self, Self::Error> {
        let id = source
            .id
            .filter(|s| !s.trim().is_empty())
            .ok_or(ExchangeValidationError::MissingId)?;
        let name = source
            .name
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ExchangeValidationError::MissingName(id.clone()))?;

        Ok(Exchange {
            id,
            name,
            year_established: source.year_established,
            country: source.country.filter(|c| !c.trim().is_empty()),
            url: source.url,
            image: source.image,
            has_trading_incentive: source.has_trading_incentive.unwrap_or(false),
            trust_score: source.trust_score,
            trust_score_rank: source.trust_score_rank,
            trade_volume_24h_btc: source.trade_volume_24h_btc.unwrap_or(0.0),
            trade_volume_24h_btc_normalized: source.trade_volume_24h_btc_normalized.unwrap_or(0.0),
        })
    }
}
