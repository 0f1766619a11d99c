//! Charts sub-client — raw series and shaped chart points.

use super::controller::ChartSelection;
use super::shape::shape;
use super::tuning::ChartTuning;
use super::wire::{MarketChartResponse, OhlcTuple};
use super::TimeSeriesPoint;
use crate::client::MarketDataClient;
use crate::error::SdkError;
use crate::shared::{ChartMode, CoinId, Currency, Timeframe};

use futures_util::future::try_join;

/// Sub-client for chart data.
pub struct Charts<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Charts<'a> {
    /// Tuning the client was built with, already sanitized.
    pub fn tuning(&self) -> &ChartTuning {
        &self.client.chart_tuning
    }

    /// Raw price / market-cap / volume series.
    pub async fn market_chart(
        &self,
        coin: &CoinId,
        currency: &Currency,
        timeframe: Timeframe,
    ) -> Result<MarketChartResponse, SdkError> {
        Ok(self
            .client
            .http
            .get_market_chart(coin, currency, timeframe.days(), timeframe.interval())
            .await?)
    }

    /// Raw provider candles.
    pub async fn ohlc(
        &self,
        coin: &CoinId,
        currency: &Currency,
        timeframe: Timeframe,
    ) -> Result<Vec<OhlcTuple>, SdkError> {
        Ok(self
            .client
            .http
            .get_ohlc(coin, currency, timeframe.days())
            .await?)
    }

    /// Shaped chart points for one coin, timeframe and mode.
    ///
    /// Price OHLC mode fetches candles and the volume series concurrently; if
    /// either request fails the whole call fails. An empty `Vec` means the
    /// provider had no data.
    pub async fn series(
        &self,
        coin: &CoinId,
        currency: &Currency,
        timeframe: Timeframe,
        mode: ChartMode,
    ) -> Result<Vec<TimeSeriesPoint>, SdkError> {
        let tuning = self.tuning();
        if mode.uses_ohlc_endpoint() {
            let (candles, chart) = try_join(
                self.ohlc(coin, currency, timeframe),
                self.market_chart(coin, currency, timeframe),
            )
            .await?;
            Ok(shape(mode, &chart, Some(&candles), tuning))
        } else {
            let chart = self.market_chart(coin, currency, timeframe).await?;
            Ok(shape(mode, &chart, None, tuning))
        }
    }

    pub async fn series_for(
        &self,
        selection: &ChartSelection,
    ) -> Result<Vec<TimeSeriesPoint>, SdkError> {
        self.series(
            &selection.coin,
            &selection.currency,
            selection.timeframe,
            selection.mode,
        )
        .await
    }
}
