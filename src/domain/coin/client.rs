//! Coins sub-client — listing and detail.

use crate::client::MarketDataClient;
use crate::domain::coin::{self, CoinDetail, CoinMarket};
use crate::error::SdkError;
use crate::shared::{CoinId, Currency};

/// Sub-client for coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Coins<'a> {
    /// One page of the market-cap ordered listing.
    ///
    /// Rows that fail validation are dropped with a warning rather than
    /// failing the whole page.
    pub async fn markets(
        &self,
        currency: &Currency,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<CoinMarket>, SdkError> {
        let rows = self
            .client
            .http
            .get_coins_markets(currency, page, per_page)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match CoinMarket::try_from(row) {
                Ok(coin) => Some(coin),
                Err(e) => {
                    tracing::warn!("Skipping coin row: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Detail for one coin.
    pub async fn detail(&self, id: &CoinId) -> Result<CoinDetail, SdkError> {
        let resp = self.client.http.get_coin(id).await?;
        resp.try_into()
            .map_err(|e: coin::ValidationError| SdkError::Validation(e.to_string()))
    }
}
