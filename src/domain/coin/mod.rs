//! Coin domain — listing rows and the detail panel.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{CoinId, Currency};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─── CoinMarket ──────────────────────────────────────────────────────────────

/// One row of the coin listing, ordered by market cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CoinMarket {
    /// Upper-case ticker, e.g. `BTC`.
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// True when the 24h change is known and non-negative.
    pub fn is_up_24h(&self) -> bool {
        self.price_change_percentage_24h.is_some_and(|p| p >= 0.0)
    }
}

// ─── CoinDetail ──────────────────────────────────────────────────────────────

/// Figures for the info panel, keyed by lower-case currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinMarketData {
    pub current_price: HashMap<String, f64>,
    pub market_cap: HashMap<String, f64>,
    pub total_volume: HashMap<String, f64>,
    pub high_24h: HashMap<String, f64>,
    pub low_24h: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// A validated coin detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    /// English description; empty when the provider has none.
    pub description: String,
    pub homepage: Option<String>,
    pub image: Option<String>,
    pub market_cap_rank: Option<u32>,
    pub genesis_date: Option<NaiveDate>,
    pub market_data: CoinMarketData,
}

impl CoinDetail {
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }

    pub fn price_in(&self, currency: &Currency) -> Option<f64> {
        self.market_data.current_price.get(currency.as_str()).copied()
    }

    pub fn market_cap_in(&self, currency: &Currency) -> Option<f64> {
        self.market_data.market_cap.get(currency.as_str()).copied()
    }

    pub fn volume_in(&self, currency: &Currency) -> Option<f64> {
        self.market_data.total_volume.get(currency.as_str()).copied()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingSymbol,
    MissingName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Coin validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingSymbol => write!(f, "Missing symbol"),
            ValidationError::MissingName => write!(f, "Missing name"),
        }
    }
}

impl std::error::Error for ValidationError {}
