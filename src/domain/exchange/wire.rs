//! Wire types for exchange responses (REST).

use crate::shared::serde_util::lenient_f64;
use serde::{Deserialize, Serialize};

/// One row of `/exchanges`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExchangeResponse {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub year_established: Option<u32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub has_trading_incentive: Option<bool>,
    #[serde(default)]
    pub trust_score: Option<u32>,
    #[serde(default)]
    pub trust_score_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub trade_volume_24h_btc: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub trade_volume_24h_btc_normalized: Option<f64>,
}
