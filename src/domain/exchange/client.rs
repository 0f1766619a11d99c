//! Exchanges sub-client.

use crate::client::MarketDataClient;
use crate::domain::exchange::Exchange;
use crate::error::SdkError;

/// Sub-client for exchange statistics.
pub struct Exchanges<'a> {
    pub(crate) client: &'a MarketDataClient,
}

impl<'a> Exchanges<'a> {
    /// One page of exchanges, ordered by trust score rank. Invalid rows are skipped.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<Exchange>, SdkError> {
        let rows = self.client.http.get_exchanges(page, per_page).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match Exchange::try_from(row) {
                Ok(ex) => Some(ex),
                Err(e) => {
                    tracing::warn!("Skipping exchange row: {}", e);
                    None
                }
            })
            .collect())
    }
}
