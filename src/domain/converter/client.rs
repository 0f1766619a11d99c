//! Converter sub-client — spot rates and conversions.

use super::{rate_from_f64, Conversion, Direction};
use crate::client::MarketDataClient;
use crate::error::SdkError;
use crate::shared::{CoinId, Currency};
use rust_decimal::Decimal;

/// Sub-client for the currency converter.
pub struct Converter<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Converter<'a> {
    /// Price of one `coin` in `currency`.
    pub async fn rate(&self, coin: &CoinId, currency: &Currency) -> Result<Decimal, SdkError> {
        let raw = self.client.http.get_simple_price(coin, currency).await?;
        rate_from_f64(raw)
    }

    /// Fetches the current rate and converts `amount` in `direction`.
    pub async fn convert(
        &self,
        coin: &CoinId,
        currency: &Currency,
        amount: Decimal,
        direction: Direction,
    ) -> Result<Conversion, SdkError> {
        let rate = self.rate(coin, currency).await?;
        Conversion::new(direction, amount, rate)
    }

    /// Every `vs_currency` code the provider accepts.
    pub async fn supported_currencies(&self) -> Result<Vec<Currency>, SdkError> {
        let codes = self.client.http.get_supported_currencies().await?;
        Ok(codes.iter().map(|c| Currency::new(c)).collect())
    }
}
