//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the provider uses, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Provider coin identifier (e.g. `"bitcoin"`, `"ethereum"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

/// Quote currency code as the provider spells it (`vs_currency`).
///
/// Always stored lower-case; `"USD"` and `"usd"` are the same currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_lowercase())
    }

    pub fn usd() -> Self {
        Self("usd".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol for well-known codes.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "usd" | "aud" | "cad" | "nzd" | "sgd" | "hkd" => Some("$"),
            "eur" => Some("€"),
            "gbp" => Some("£"),
            "jpy" | "cny" => Some("¥"),
            "inr" => Some("₹"),
            "krw" => Some("₩"),
            "btc" => Some("₿"),
            "eth" => Some("Ξ"),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Currency::new(&s))
    }
}

// ─── Timeframe ───────────────────────────────────────────────────────────────

/// Named historical window shown on the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "24H")]
    Day1,
    #[default]
    #[serde(rename = "7D")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "3M")]
    Month3,
    #[serde(rename = "1Y")]
    Year1,
    #[serde(rename = "Max")]
    Max,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Self::Day1,
        Self::Week1,
        Self::Month1,
        Self::Month3,
        Self::Year1,
        Self::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "24H",
            Self::Week1 => "7D",
            Self::Month1 => "1M",
            Self::Month3 => "3M",
            Self::Year1 => "1Y",
            Self::Max => "Max",
        }
    }

    /// `days` query value understood by the provider.
    pub fn days(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Week1 => "7",
            Self::Month1 => "30",
            Self::Month3 => "90",
            Self::Year1 => "365",
            Self::Max => "max",
        }
    }

    /// Sampling interval; `None` lets the provider pick its automatic granularity
    /// (5-minute for 1 day, hourly up to 90 days).
    pub fn interval(&self) -> Option<&'static str> {
        match self {
            Self::Day1 | Self::Week1 | Self::Month1 => None,
            Self::Month3 | Self::Year1 | Self::Max => Some("daily"),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown timeframe: {}", s))
    }
}

// ─── ChartMode ───────────────────────────────────────────────────────────────

/// Which provider series the chart plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    Prices,
    MarketCaps,
}

/// How the series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Ohlc,
}

/// Cross product of data type and chart type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartMode {
    pub data_type: DataType,
    pub chart_type: ChartType,
}

impl ChartMode {
    pub fn new(data_type: DataType, chart_type: ChartType) -> Self {
        Self {
            data_type,
            chart_type,
        }
    }

    /// True OHLC candles exist only for prices; market caps are always synthesized.
    pub fn uses_ohlc_endpoint(&self) -> bool {
        self.data_type == DataType::Prices && self.chart_type == ChartType::Ohlc
    }
}
