//! Chart controller — owns the selection, the load status and the zoom state.
//!
//! Every selection change bumps a request generation. Results are committed
//! only when their ticket still matches the current generation and selection,
//! so a slow response for an old selection can never overwrite a newer one.

use super::tuning::ChartTuning;
use super::zoom::{GestureEvent, ZoomBounds, ZoomContext, ZoomState};
use super::TimeSeriesPoint;
use crate::error::{HttpError, SdkError};
use crate::shared::{ChartMode, ChartType, CoinId, Currency, DataType, Timeframe};

/// Everything a chart request depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartSelection {
    pub coin: CoinId,
    pub currency: Currency,
    pub timeframe: Timeframe,
    pub mode: ChartMode,
}

impl ChartSelection {
    pub fn new(coin: impl Into<CoinId>) -> Self {
        Self {
            coin: coin.into(),
            currency: Currency::default(),
            timeframe: Timeframe::default(),
            mode: ChartMode::default(),
        }
    }
}

/// Stamp carried by an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub selection: ChartSelection,
}

/// Why a load failed, coarse enough to pick a message and a retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider rejected the API key.
    Unauthorized,
    RateLimited,
    /// Anything else: network down, 5xx, malformed payload.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&SdkError> for ChartFailure {
    fn from(err: &SdkError) -> Self {
        let kind = match err {
            SdkError::Http(HttpError::Unauthorized) => FailureKind::Unauthorized,
            SdkError::Http(HttpError::RateLimited { .. }) => FailureKind::RateLimited,
            _ => FailureKind::Unavailable,
        };
        let message = match kind {
            FailureKind::Unauthorized => "Invalid or missing API key".to_string(),
            FailureKind::RateLimited => "Rate limit reached, try again shortly".to_string(),
            FailureKind::Unavailable => format!("Failed to load chart data: {}", err),
        };
        Self { kind, message }
    }
}

/// Load status. Hosts show a placeholder for `Empty` and a retry action for `Failed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChartStatus {
    #[default]
    Idle,
    Loading,
    Ready(Vec<TimeSeriesPoint>),
    /// The request succeeded but the provider had no data points.
    Empty,
    Failed(ChartFailure),
}

impl ChartStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ChartStatus::Loading)
    }

    pub fn failure(&self) -> Option<&ChartFailure> {
        match self {
            ChartStatus::Failed(f) => Some(f),
            _ => None,
        }
    }
}

/// State owned by one chart view.
#[derive(Debug, Clone)]
pub struct ChartController {
    selection: ChartSelection,
    generation: u64,
    status: ChartStatus,
    zoom: ZoomState,
    tuning: ChartTuning,
}

impl ChartController {
    pub fn new(selection: ChartSelection) -> Self {
        Self {
            selection,
            generation: 0,
            status: ChartStatus::Idle,
            zoom: ZoomState::default(),
            tuning: ChartTuning::default(),
        }
    }

    /// Controller that shares the tuning configured on `client`.
    #[cfg(feature = "http")]
    pub fn for_client(client: &crate::client::MarketDataClient, selection: ChartSelection) -> Self {
        Self::new(selection).with_tuning(*client.chart_tuning())
    }

    pub fn with_tuning(mut self, tuning: ChartTuning) -> Self {
        self.tuning = tuning.sanitized();
        self
    }

    pub fn selection(&self) -> &ChartSelection {
        &self.selection
    }

    pub fn status(&self) -> &ChartStatus {
        &self.status
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn tuning(&self) -> &ChartTuning {
        &self.tuning
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Committed points; empty unless the status is `Ready`.
    pub fn points(&self) -> &[TimeSeriesPoint] {
        match &self.status {
            ChartStatus::Ready(points) => points,
            _ => &[],
        }
    }

    // ── Selection changes ────────────────────────────────────────────────

    pub fn set_coin(&mut self, coin: CoinId) -> Option<RequestTicket> {
        if self.selection.coin == coin {
            return None;
        }
        self.selection.coin = coin;
        self.reset_zoom(GestureEvent::TimeframeChanged);
        Some(self.begin_request())
    }

    pub fn set_currency(&mut self, currency: Currency) -> Option<RequestTicket> {
        if self.selection.currency == currency {
            return None;
        }
        self.selection.currency = currency;
        self.reset_zoom(GestureEvent::DataTypeChanged);
        Some(self.begin_request())
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Option<RequestTicket> {
        if self.selection.timeframe == timeframe {
            return None;
        }
        self.selection.timeframe = timeframe;
        self.reset_zoom(GestureEvent::TimeframeChanged);
        Some(self.begin_request())
    }

    pub fn set_data_type(&mut self, data_type: DataType) -> Option<RequestTicket> {
        if self.selection.mode.data_type == data_type {
            return None;
        }
        self.selection.mode.data_type = data_type;
        self.reset_zoom(GestureEvent::DataTypeChanged);
        Some(self.begin_request())
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) -> Option<RequestTicket> {
        if self.selection.mode.chart_type == chart_type {
            return None;
        }
        self.selection.mode.chart_type = chart_type;
        self.reset_zoom(GestureEvent::ChartTypeChanged);
        Some(self.begin_request())
    }

    fn reset_zoom(&mut self, event: GestureEvent) {
        let ctx = ZoomContext::new(&[], self.selection.mode.chart_type);
        self.zoom.apply(event, &ctx);
    }

    // ── Request lifecycle ────────────────────────────────────────────────

    /// Start a load for the current selection. Any older in-flight ticket becomes stale.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        self.status = ChartStatus::Loading;
        RequestTicket {
            generation: self.generation,
            selection: self.selection.clone(),
        }
    }

    /// User-initiated retry after a failure.
    pub fn retry(&mut self) -> RequestTicket {
        self.begin_request()
    }

    /// Commit a finished load. Returns `false` (and changes nothing) for stale tickets.
    pub fn commit(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Vec<TimeSeriesPoint>, SdkError>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.selection != self.selection {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                coin = %ticket.selection.coin,
                "Discarding stale chart response"
            );
            return false;
        }

        self.status = match result {
            Ok(points) if points.is_empty() => ChartStatus::Empty,
            Ok(points) => ChartStatus::Ready(points),
            Err(e) => {
                tracing::warn!(coin = %self.selection.coin, "Chart load failed: {}", e);
                ChartStatus::Failed(ChartFailure::from(&e))
            }
        };
        true
    }

    /// Fetch and commit the current selection in one step, adopting the
    /// client's tuning.
    ///
    /// The controller stays mutably borrowed until the fetch completes, so no
    /// selection change can supersede it. Hosts that let the user change the
    /// selection mid-flight should drive [`begin_request`](Self::begin_request)
    /// and [`commit`](Self::commit) themselves.
    #[cfg(feature = "http")]
    pub async fn refresh(&mut self, charts: &super::client::Charts<'_>) -> bool {
        self.tuning = *charts.tuning();
        let ticket = self.begin_request();
        let result = charts.series_for(&ticket.selection).await;
        self.commit(&ticket, result)
    }

    // ── Gestures ─────────────────────────────────────────────────────────

    /// Feed a pointer/wheel gesture. Returns whether page scroll must be suppressed.
    pub fn gesture(&mut self, event: GestureEvent) -> bool {
        let points = match &self.status {
            ChartStatus::Ready(points) => points.as_slice(),
            _ => &[],
        };
        let ctx = ZoomContext::new(points, self.selection.mode.chart_type).with_tuning(self.tuning);
        self.zoom.apply(event, &ctx)
    }

    /// Bounds to render, `FullRange` resolved against the committed points.
    pub fn visible_bounds(&self) -> Option<ZoomBounds> {
        let ctx = ZoomContext::new(self.points(), self.selection.mode.chart_type)
            .with_tuning(self.tuning);
        self.zoom.resolve(&ctx)
    }

    /// Committed points whose time falls inside the visible window.
    pub fn visible_points(&self) -> &[TimeSeriesPoint] {
        let points = self.points();
        let Some(bounds) = self.visible_bounds() else {
            return points;
        };
        let start = points.partition_point(|p| (p.time as f64) < bounds.left);
        let end = points.partition_point(|p| (p.time as f64) <= bounds.right);
        &points[start..end.max(start)]
    }
}
