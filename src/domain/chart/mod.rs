//! Chart domain — series shaping, zoom state, request supersession.

#[cfg(feature = "http")]
pub mod client;
pub mod controller;
pub mod shape;
pub mod tuning;
pub mod wire;
pub mod zoom;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use controller::{ChartController, ChartFailure, ChartSelection, ChartStatus, FailureKind, RequestTicket};
pub use tuning::ChartTuning;
pub use zoom::{GestureEvent, Reduced, ZoomBounds, ZoomContext, ZoomState, ZoomWindow};

/// One renderable chart point.
///
/// For synthesized series `open` is the previous point's value and
/// `high`/`low` are the max/min of `open` and `close`. For OHLC series
/// they come straight from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    /// Plotted value; always equal to `close`.
    pub value: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub is_up: bool,
}

impl TimeSeriesPoint {
    /// A point built from two consecutive values.
    pub fn synthesized(time: i64, open: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            value: close,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume,
            is_up: close >= open,
        }
    }

    /// A point built from a provider candle.
    pub fn from_candle(candle: &wire::OhlcTuple, volume: f64) -> Self {
        Self {
            time: candle.time,
            value: candle.close,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume,
            is_up: candle.close >= candle.open,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.time)
    }
}
