//! Series shaping: provider tuples → uniform [`TimeSeriesPoint`] sequences.
//!
//! Everything here is pure. The fetching half lives in the chart sub-client.

use super::tuning::ChartTuning;
use super::wire::{MarketChartResponse, OhlcTuple, SeriesSample};
use super::TimeSeriesPoint;
use crate::shared::{ChartMode, DataType};

/// Shapes already-fetched provider data for `mode`.
///
/// `candles` is only consulted for price OHLC mode; when it is `None` there
/// the price series is synthesized instead.
pub fn shape(
    mode: ChartMode,
    chart: &MarketChartResponse,
    candles: Option<&[OhlcTuple]>,
    tuning: &ChartTuning,
) -> Vec<TimeSeriesPoint> {
    match (mode.data_type, candles) {
        (DataType::MarketCaps, _) => shape_synthesized(&chart.market_caps, &chart.total_volumes),
        (DataType::Prices, Some(c)) if mode.uses_ohlc_endpoint() => {
            shape_ohlc(c, &chart.total_volumes, tuning.volume_join_tolerance_ms)
        }
        (DataType::Prices, _) => shape_synthesized(&chart.prices, &chart.total_volumes),
    }
}

/// Builds points from a single value series, deriving open from the previous value.
///
/// `volumes` is parallel to `values` by index; a missing or `null` entry
/// yields zero volume. `null` values are skipped without breaking continuity.
pub fn shape_synthesized(values: &[SeriesSample], volumes: &[SeriesSample]) -> Vec<TimeSeriesPoint> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    if !values.windows(2).all(|w| w[0].time <= w[1].time) {
        order.sort_by_key(|&i| values[i].time);
    }

    let mut points = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for i in order {
        let Some(value) = values[i].value.filter(|v| v.is_finite()) else {
            continue;
        };
        let volume = volumes
            .get(i)
            .and_then(|s| s.value)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let open = prev.unwrap_or(value);
        points.push(TimeSeriesPoint::synthesized(values[i].time, open, value, volume));
        prev = Some(value);
    }
    points
}

/// Builds points from provider candles, joining each with the volume sample
/// nearest in time. Samples further than `tolerance_ms` away are ignored.
pub fn shape_ohlc(
    candles: &[OhlcTuple],
    volumes: &[SeriesSample],
    tolerance_ms: i64,
) -> Vec<TimeSeriesPoint> {
    let mut sorted_volumes: Vec<(i64, f64)> = volumes
        .iter()
        .filter_map(|s| s.value.filter(|v| v.is_finite()).map(|v| (s.time, v)))
        .collect();
    sorted_volumes.sort_by_key(|(t, _)| *t);

    let mut sorted_candles: Vec<&OhlcTuple> = candles.iter().collect();
    sorted_candles.sort_by_key(|c| c.time);

    sorted_candles
        .into_iter()
        .map(|c| {
            let volume = nearest_volume(&sorted_volumes, c.time, tolerance_ms).unwrap_or(0.0);
            TimeSeriesPoint::from_candle(c, volume)
        })
        .collect()
}

/// Nearest sample to `time` within `tolerance_ms`; ties go to the earlier sample.
fn nearest_volume(sorted: &[(i64, f64)], time: i64, tolerance_ms: i64) -> Option<f64> {
    let idx = sorted.partition_point(|(t, _)| *t < time);
    let before = idx.checked_sub(1).and_then(|i| sorted.get(i));
    let after = sorted.get(idx);

    let best = match (before, after) {
        (Some(b), Some(a)) => {
            if (time - b.0) <= (a.0 - time) {
                b
            } else {
                a
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    ((best.0 - time).abs() <= tolerance_ms).then_some(best.1)
}

/// True when `points` are in non-decreasing time order.
pub fn is_chronological(points: &[TimeSeriesPoint]) -> bool {
    points.windows(2).all(|w| w[0].time <= w[1].time)
}
