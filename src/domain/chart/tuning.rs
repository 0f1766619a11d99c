//! Tuning constants for series joining and zoom behaviour.

use serde::{Deserialize, Serialize};

/// Knobs for the shaper and the zoom reducer.
///
/// Every field is adjustable; [`ChartTuning::sanitized`] falls back to defaults for unusable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartTuning {
    /// Max distance between an OHLC candle and the volume sample joined to it.
    pub volume_join_tolerance_ms: i64,
    /// Span multiplier per zoom-in tick (< 1).
    pub zoom_factor: f64,
    /// Narrowest visible time span.
    pub min_span_ms: i64,
    /// Zooming out past this multiple of the full data span snaps back to full range.
    pub max_zoom_out: f64,
    /// Multiplier applied to the lowest visible value.
    pub pad_low: f64,
    /// Multiplier applied to the highest visible value.
    pub pad_high: f64,
}

impl Default for ChartTuning {
    fn default() -> Self {
        Self {
            volume_join_tolerance_ms: 60 * 60 * 1000,
            zoom_factor: 0.95,
            min_span_ms: 60_000,
            max_zoom_out: 3.0,
            pad_low: 0.995,
            pad_high: 1.005,
        }
    }
}

impl ChartTuning {
    /// Falls back to defaults for nonsensical values (zoom factor outside (0, 1), etc.).
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            volume_join_tolerance_ms: self.volume_join_tolerance_ms.max(0),
            zoom_factor: if self.zoom_factor > 0.0 && self.zoom_factor < 1.0 {
                self.zoom_factor
            } else {
                defaults.zoom_factor
            },
            min_span_ms: self.min_span_ms.max(1),
            max_zoom_out: if self.max_zoom_out >= 1.0 {
                self.max_zoom_out
            } else {
                defaults.max_zoom_out
            },
            pad_low: if self.pad_low > 0.0 {
                self.pad_low
            } else {
                defaults.pad_low
            },
            pad_high: if self.pad_high > 0.0 {
                self.pad_high
            } else {
                defaults.pad_high
            },
        }
    }
}
