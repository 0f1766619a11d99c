//! Wire types for chart series (REST).
//!
//! The provider encodes every sample as a JSON array rather than an object:
//! `[timestamp_ms, value]` for market-chart series and
//! `[timestamp_ms, open, high, low, close]` for OHLC candles.

use crate::shared::serde_util::millis_from_f64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One `[timestamp_ms, value]` sample. `value` is `None` when the provider sent `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSample {
    pub time: i64,
    pub value: Option<f64>,
}

impl SeriesSample {
    pub fn new(time: i64, value: f64) -> Self {
        Self {
            time,
            value: Some(value),
        }
    }
}

impl<'de> Deserialize<'de> for SeriesSample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (raw_time, value) = <(f64, Option<f64>)>::deserialize(deserializer)?;
        let time = millis_from_f64(raw_time).ok_or_else(|| {
            serde::de::Error::custom(format!("Invalid timestamp: {}", raw_time))
        })?;
        Ok(Self { time, value })
    }
}

impl Serialize for SeriesSample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.time, self.value).serialize(serializer)
    }
}

/// `/coins/{id}/market_chart` response. Series are parallel by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<SeriesSample>,
    #[serde(default)]
    pub market_caps: Vec<SeriesSample>,
    #[serde(default)]
    pub total_volumes: Vec<SeriesSample>,
}

/// One `[timestamp_ms, open, high, low, close]` candle from `/coins/{id}/ohlc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhlcTuple {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl<'de> Deserialize<'de> for OhlcTuple {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (raw_time, open, high, low, close) =
            <(f64, f64, f64, f64, f64)>::deserialize(deserializer)?;
        let time = millis_from_f64(raw_time).ok_or_else(|| {
            serde::de::Error::custom(format!("Invalid timestamp: {}", raw_time))
        })?;
        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }
}

impl Serialize for OhlcTuple {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.time, self.open, self.high, self.low, self.close).serialize(serializer)
    }
}
