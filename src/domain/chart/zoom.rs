//! Zoom/pan state machine for the interactive chart.
//!
//! The host translates pointer and wheel events into [`GestureEvent`]s and
//! feeds them through [`reduce`]. Nothing here touches a UI framework.

use super::tuning::ChartTuning;
use super::TimeSeriesPoint;
use crate::shared::ChartType;

/// Explicit visible bounds. `left`/`right` are unix millis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ZoomBounds {
    pub fn span(&self) -> f64 {
        self.right - self.left
    }
}

/// Visible window: the data's own extent, or bounds picked by zoom gestures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ZoomWindow {
    #[default]
    FullRange,
    Zoomed(ZoomBounds),
}

/// Zoom window plus the pointer bookkeeping that anchors gestures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomState {
    pub window: ZoomWindow,
    /// Timestamp of the last hovered point; the zoom focus when present.
    pub hovered: Option<i64>,
    /// Whether the pointer is over the chart surface.
    pub pointer_inside: bool,
}

/// Input to the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerEnter,
    /// Pointer moved over the data point at `time`.
    Hover { time: i64 },
    PointerLeave,
    /// Wheel tick; negative `delta_y` zooms in, positive zooms out.
    Wheel { delta_y: f64 },
    TimeframeChanged,
    DataTypeChanged,
    ChartTypeChanged,
}

/// Data the reducer reads but never mutates.
#[derive(Debug, Clone, Copy)]
pub struct ZoomContext<'a> {
    pub points: &'a [TimeSeriesPoint],
    pub chart_type: ChartType,
    pub tuning: ChartTuning,
}

impl<'a> ZoomContext<'a> {
    pub fn new(points: &'a [TimeSeriesPoint], chart_type: ChartType) -> Self {
        Self {
            points,
            chart_type,
            tuning: ChartTuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: ChartTuning) -> Self {
        self.tuning = tuning.sanitized();
        self
    }
}

/// Reducer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduced {
    pub state: ZoomState,
    /// The host must suppress the default page scroll for this event.
    pub consume_scroll: bool,
}

impl Reduced {
    fn pass(state: ZoomState) -> Self {
        Self {
            state,
            consume_scroll: false,
        }
    }
}

/// `(ZoomState, GestureEvent) -> ZoomState`.
pub fn reduce(state: &ZoomState, event: GestureEvent, ctx: &ZoomContext<'_>) -> Reduced {
    let mut next = *state;
    match event {
        GestureEvent::PointerEnter => {
            next.pointer_inside = true;
            Reduced::pass(next)
        }
        GestureEvent::Hover { time } => {
            next.pointer_inside = true;
            if !ctx.points.is_empty() {
                next.hovered = Some(time);
            }
            Reduced::pass(next)
        }
        GestureEvent::PointerLeave => {
            next.pointer_inside = false;
            next.hovered = None;
            Reduced::pass(next)
        }
        GestureEvent::TimeframeChanged
        | GestureEvent::DataTypeChanged
        | GestureEvent::ChartTypeChanged => {
            next.window = ZoomWindow::FullRange;
            next.hovered = None;
            Reduced::pass(next)
        }
        GestureEvent::Wheel { delta_y } => {
            if !state.pointer_inside {
                return Reduced::pass(next);
            }
            if delta_y < 0.0 {
                next.window = zoom(state, ctx, true);
            } else if delta_y > 0.0 {
                next.window = zoom(state, ctx, false);
            }
            Reduced {
                state: next,
                consume_scroll: true,
            }
        }
    }
}

impl ZoomState {
    /// In-place [`reduce`]; returns whether page scroll must be suppressed.
    pub fn apply(&mut self, event: GestureEvent, ctx: &ZoomContext<'_>) -> bool {
        let reduced = reduce(self, event, ctx);
        *self = reduced.state;
        reduced.consume_scroll
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self.window, ZoomWindow::Zoomed(_))
    }

    /// Bounds to render, with `FullRange` resolved against the data.
    pub fn resolve(&self, ctx: &ZoomContext<'_>) -> Option<ZoomBounds> {
        match self.window {
            ZoomWindow::Zoomed(bounds) => Some(bounds),
            ZoomWindow::FullRange => full_range_bounds(ctx),
        }
    }
}

/// Data extent with the same vertical padding zoomed windows get.
pub fn full_range_bounds(ctx: &ZoomContext<'_>) -> Option<ZoomBounds> {
    let first = ctx.points.first()?;
    let (left, right) = ctx
        .points
        .iter()
        .fold((first.time, first.time), |(lo, hi), p| {
            (lo.min(p.time), hi.max(p.time))
        });
    let (left, right) = (left as f64, right as f64);
    let (bottom, top) = value_range(ctx, left, right)?;
    Some(ZoomBounds {
        left,
        right,
        top,
        bottom,
    })
}

/// Padded `(bottom, top)` over points inside `[left, right]`.
fn value_range(ctx: &ZoomContext<'_>, left: f64, right: f64) -> Option<(f64, f64)> {
    // absorbs float drift so edge points survive repeated rescaling
    let eps = (right - left).abs() * 1e-9;
    let mut range: Option<(f64, f64)> = None;
    for p in ctx.points {
        let t = p.time as f64;
        if t < left - eps || t > right + eps {
            continue;
        }
        let (lo, hi) = match ctx.chart_type {
            ChartType::Line => (p.value, p.value),
            ChartType::Ohlc => (p.low, p.high),
        };
        range = Some(match range {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        });
    }
    range.map(|(min, max)| (min * ctx.tuning.pad_low, max * ctx.tuning.pad_high))
}

fn zoom(state: &ZoomState, ctx: &ZoomContext<'_>, zoom_in: bool) -> ZoomWindow {
    let tuning = &ctx.tuning;
    let Some(full) = full_range_bounds(ctx) else {
        return state.window;
    };
    let full_span = full.span();
    if full_span <= 0.0 {
        return state.window;
    }

    let current = match state.window {
        ZoomWindow::FullRange => full,
        ZoomWindow::Zoomed(bounds) => bounds,
    };
    let span = current.span();
    if span.is_nan() || span <= 0.0 {
        return state.window;
    }

    let focus = state
        .hovered
        .map(|t| t as f64)
        .unwrap_or((current.left + current.right) / 2.0)
        .clamp(current.left, current.right);
    let ratio = (focus - current.left) / span;

    let new_span = if zoom_in {
        span * tuning.zoom_factor
    } else {
        span / tuning.zoom_factor
    };

    if zoom_in && new_span < tuning.min_span_ms as f64 {
        tracing::debug!(span_ms = new_span, "Zoom rejected below minimum span");
        return state.window;
    }
    if !zoom_in && new_span > full_span * tuning.max_zoom_out {
        return ZoomWindow::FullRange;
    }

    let left = focus - ratio * new_span;
    let right = left + new_span;
    let (bottom, top) = value_range(ctx, left, right).unwrap_or((current.bottom, current.top));

    ZoomWindow::Zoomed(ZoomBounds {
        left,
        right,
        top,
        bottom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000;
    const HOUR: i64 = 60 * MINUTE;

    fn line(values: &[(i64, f64)]) -> Vec<TimeSeriesPoint> {
        let mut prev = None;
        values
            .iter()
            .map(|&(t, v)| {
                let p = TimeSeriesPoint::synthesized(t, prev.unwrap_or(v), v, 0.0);
                prev = Some(v);
                p
            })
            .collect()
    }

    fn hourly(n: i64) -> Vec<TimeSeriesPoint> {
        let values: Vec<(i64, f64)> = (0..n).map(|i| (i * HOUR, 100.0 + i as f64)).collect();
        line(&values)
    }

    fn inside() -> ZoomState {
        ZoomState {
            pointer_inside: true,
            ..ZoomState::default()
        }
    }

    const IN: GestureEvent = GestureEvent::Wheel { delta_y: -1.0 };
    const OUT: GestureEvent = GestureEvent::Wheel { delta_y: 1.0 };

    fn bounds(state: &ZoomState) -> ZoomBounds {
        match state.window {
            ZoomWindow::Zoomed(b) => b,
            ZoomWindow::FullRange => panic!("expected zoomed window"),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-3_f64.max(1e-9 * a.abs().max(b.abs()))
    }

    #[test]
    fn test_empty_data_gestures_are_noops() {
        let ctx = ZoomContext::new(&[], ChartType::Line);
        let mut state = inside();
        assert!(state.apply(IN, &ctx));
        assert!(state.apply(OUT, &ctx));
        state.apply(GestureEvent::Hover { time: 5 }, &ctx);
        assert_eq!(state.window, ZoomWindow::FullRange);
        assert_eq!(state.hovered, None);
        assert_eq!(state.resolve(&ctx), None);
    }

    #[test]
    fn test_wheel_outside_chart_is_not_consumed() {
        let points = hourly(10);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let reduced = reduce(&ZoomState::default(), IN, &ctx);
        assert!(!reduced.consume_scroll);
        assert_eq!(reduced.state.window, ZoomWindow::FullRange);
    }

    #[test]
    fn test_zero_delta_consumed_without_change() {
        let points = hourly(10);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let reduced = reduce(&inside(), GestureEvent::Wheel { delta_y: 0.0 }, &ctx);
        assert!(reduced.consume_scroll);
        assert_eq!(reduced.state, inside());
    }

    #[test]
    fn test_zoom_in_at_midpoint() {
        let points = hourly(11);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        state.apply(IN, &ctx);
        let b = bounds(&state);
        let full_span = (10 * HOUR) as f64;
        assert!(close(b.span(), full_span * 0.95));
        assert!(close((b.left + b.right) / 2.0, full_span / 2.0));
    }

    #[test]
    fn test_zoom_in_preserves_focus_ratio() {
        let points = hourly(11);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        let focus = 2 * HOUR;
        state.apply(GestureEvent::Hover { time: focus }, &ctx);
        state.apply(IN, &ctx);
        let b = bounds(&state);
        // focus sat at 20% of the original window
        assert!(close((focus as f64 - b.left) / b.span(), 0.2));
        assert!(b.left > 0.0);
    }

    #[test]
    fn test_vertical_bounds_scan_only_visible_points() {
        let mut values: Vec<(i64, f64)> = (0..=100).map(|i| (i * MINUTE * 10, 50.0)).collect();
        values[100].1 = 500.0;
        let points = line(&values);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        state.apply(GestureEvent::Hover { time: 0 }, &ctx);

        let full = state.resolve(&ctx).unwrap();
        assert!(close(full.top, 500.0 * 1.005));

        for _ in 0..5 {
            state.apply(IN, &ctx);
        }
        let b = bounds(&state);
        assert!(b.right < (100 * MINUTE * 10) as f64);
        assert!(close(b.top, 50.0 * 1.005));
        assert!(close(b.bottom, 50.0 * 0.995));
    }

    #[test]
    fn test_ohlc_vertical_bounds_use_high_low() {
        let candle = |t: i64, low: f64, high: f64| TimeSeriesPoint {
            time: t,
            value: 10.0,
            open: 10.0,
            high,
            low,
            close: 10.0,
            volume: 0.0,
            is_up: true,
        };
        let points = vec![candle(0, 8.0, 12.0), candle(HOUR, 9.0, 15.0)];
        let ctx = ZoomContext::new(&points, ChartType::Ohlc);
        let full = full_range_bounds(&ctx).unwrap();
        assert!(close(full.bottom, 8.0 * 0.995));
        assert!(close(full.top, 15.0 * 1.005));
    }

    #[test]
    fn test_zoom_below_min_span_rejected() {
        let points = line(&[(0, 1.0), (61_000, 2.0)]);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        state.apply(GestureEvent::Hover { time: 0 }, &ctx);
        let before = state;
        assert!(state.apply(IN, &ctx));
        assert_eq!(state, before);
    }

    #[test]
    fn test_zoom_out_past_limit_snaps_to_full_range() {
        let points = hourly(5);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        for _ in 0..21 {
            state.apply(OUT, &ctx);
        }
        assert!(state.is_zoomed());
        state.apply(OUT, &ctx);
        assert_eq!(state.window, ZoomWindow::FullRange);
    }

    #[test]
    fn test_zoom_in_then_out_round_trips() {
        let points = hourly(48);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let full = full_range_bounds(&ctx).unwrap();

        for hover in [None, Some(7 * HOUR)] {
            let mut state = inside();
            if let Some(t) = hover {
                state.apply(GestureEvent::Hover { time: t }, &ctx);
            }
            for _ in 0..10 {
                state.apply(IN, &ctx);
            }
            for _ in 0..10 {
                state.apply(OUT, &ctx);
            }
            let b = state.resolve(&ctx).unwrap();
            assert!(close(b.left, full.left), "left {} vs {}", b.left, full.left);
            assert!(close(b.right, full.right));
            assert!(close(b.top, full.top));
            assert!(close(b.bottom, full.bottom));
        }
    }

    #[test]
    fn test_single_point_disables_zoom() {
        let points = hourly(1);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        state.apply(IN, &ctx);
        assert_eq!(state.window, ZoomWindow::FullRange);
        state.apply(OUT, &ctx);
        assert_eq!(state.window, ZoomWindow::FullRange);
    }

    #[test]
    fn test_resets_return_to_full_range() {
        let points = hourly(24);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        for reset in [
            GestureEvent::TimeframeChanged,
            GestureEvent::DataTypeChanged,
            GestureEvent::ChartTypeChanged,
        ] {
            let mut state = inside();
            state.apply(GestureEvent::Hover { time: 3 * HOUR }, &ctx);
            for _ in 0..15 {
                state.apply(IN, &ctx);
            }
            assert!(state.is_zoomed());
            state.apply(reset, &ctx);
            assert_eq!(state.window, ZoomWindow::FullRange);
            assert_eq!(state.hovered, None);
            assert!(state.pointer_inside);
        }
    }

    #[test]
    fn test_leave_clears_anchor_and_falls_back_to_midpoint() {
        let points = hourly(11);
        let ctx = ZoomContext::new(&points, ChartType::Line);
        let mut state = inside();
        state.apply(GestureEvent::Hover { time: HOUR }, &ctx);
        state.apply(GestureEvent::PointerLeave, &ctx);
        assert_eq!(state.hovered, None);
        assert!(!state.apply(IN, &ctx));

        state.apply(GestureEvent::PointerEnter, &ctx);
        state.apply(IN, &ctx);
        let b = bounds(&state);
        assert!(close((b.left + b.right) / 2.0, (5 * HOUR) as f64));
    }

    #[test]
    fn test_custom_tuning() {
        let points = hourly(11);
        let tuning = ChartTuning {
            zoom_factor: 0.5,
            ..ChartTuning::default()
        };
        let ctx = ZoomContext::new(&points, ChartType::Line).with_tuning(tuning);
        let mut state = inside();
        state.apply(IN, &ctx);
        assert!(close(bounds(&state).span(), (5 * HOUR) as f64));
    }
}
