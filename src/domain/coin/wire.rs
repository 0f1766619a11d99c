//! Wire types for coin responses (REST).

use crate::shared::serde_util::lenient_f64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── /coins/markets ─────────────────────────────────────────────────────────

/// One row of `/coins/markets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub high_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub low_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub circulating_supply: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

// ─── /coins/{id} ────────────────────────────────────────────────────────────

/// `/coins/{id}` response, requested without tickers or community data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinDetailResponse {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// Localized descriptions keyed by language code.
    #[serde(default)]
    pub description: HashMap<String, Option<String>>,
    #[serde(default)]
    pub links: Option<CoinLinksResponse>,
    #[serde(default)]
    pub image: Option<CoinImageResponse>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub genesis_date: Option<String>,
    #[serde(default)]
    pub market_data: Option<CoinMarketDataResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinLinksResponse {
    #[serde(default)]
    pub homepage: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinImageResponse {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Per-currency figures keyed by lower-case currency code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketDataResponse {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub high_24h: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub low_24h: HashMap<String, Option<f64>>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub max_supply: Option<f64>,
}
