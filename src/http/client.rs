//! Low-level HTTP client — `MarketDataHttp`.
//!
//! One method per provider endpoint. Returns wire types (conversion to domain types
//! happens at the sub-client boundary). Every call is a read-only GET.

use crate::domain::chart::wire::{MarketChartResponse, OhlcTuple};
use crate::domain::coin::wire::{CoinDetailResponse, CoinMarketResponse};
use crate::domain::converter::wire::SimplePriceResponse;
use crate::domain::exchange::wire::ExchangeResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::network::{ApiPlan, KeyPlacement};
use crate::shared::{CoinId, Currency};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// `/ping` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    pub gecko_says: String,
}

/// Low-level HTTP client for the market-data REST API.
pub struct MarketDataHttp {
    base_url: String,
    client: Client,
    plan: ApiPlan,
    placement: KeyPlacement,
    retry: RetryPolicy,
    /// API key. Never logged, never exposed publicly.
    api_key: Arc<RwLock<Option<String>>>,
}

impl MarketDataHttp {
    pub fn new(base_url: &str, plan: ApiPlan, placement: KeyPlacement) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            plan,
            placement,
            retry: RetryPolicy::None,
            api_key: Arc::new(RwLock::new(None)),
        })
    }

    /// Replace the retry policy applied to every request (default: none).
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Seed the API key at construction time.
    pub fn with_api_key(self, key: Option<String>) -> Self {
        Self {
            api_key: Arc::new(RwLock::new(key.filter(|k| !k.trim().is_empty()))),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn plan(&self) -> ApiPlan {
        self.plan
    }

    /// Set or rotate the API key.
    pub async fn set_api_key(&self, key: Option<String>) {
        *self.api_key.write().await = key.filter(|k| !k.trim().is_empty());
    }

    pub async fn has_api_key(&self) -> bool {
        self.api_key.read().await.is_some()
    }

    // ── Status ───────────────────────────────────────────────────────────

    pub async fn ping(&self) -> Result<PingResponse, HttpError> {
        self.get(&self.endpoint("/ping", &[])).await
    }

    // ── Coins ────────────────────────────────────────────────────────────

    pub async fn get_coins_markets(
        &self,
        currency: &Currency,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let mut params = vec![
            ("vs_currency", currency.as_str().to_string()),
            ("order", "market_cap_desc".to_string()),
            ("price_change_percentage", "24h".to_string()),
        ];
        if let Some(p) = page {
            params.push(("page", p.to_string()));
        }
        if let Some(pp) = per_page {
            params.push(("per_page", pp.to_string()));
        }
        self.get(&self.endpoint("/coins/markets", &params)).await
    }

    pub async fn get_coin(&self, id: &CoinId) -> Result<CoinDetailResponse, HttpError> {
        let path = format!("/coins/{}", urlencoding::encode(id.as_str()));
        let params = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
        ];
        self.get(&self.endpoint(&path, &params)).await
    }

    // ── Charts ───────────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        id: &CoinId,
        currency: &Currency,
        days: &str,
        interval: Option<&str>,
    ) -> Result<MarketChartResponse, HttpError> {
        let path = format!("/coins/{}/market_chart", urlencoding::encode(id.as_str()));
        let mut params = vec![
            ("vs_currency", currency.as_str().to_string()),
            ("days", days.to_string()),
        ];
        if let Some(i) = interval {
            params.push(("interval", i.to_string()));
        }
        self.get(&self.endpoint(&path, &params)).await
    }

    pub async fn get_ohlc(
        &self,
        id: &CoinId,
        currency: &Currency,
        days: &str,
    ) -> Result<Vec<OhlcTuple>, HttpError> {
        let path = format!("/coins/{}/ohlc", urlencoding::encode(id.as_str()));
        let params = [
            ("vs_currency", currency.as_str().to_string()),
            ("days", days.to_string()),
        ];
        self.get(&self.endpoint(&path, &params)).await
    }

    // ── Prices ───────────────────────────────────────────────────────────

    /// Spot rate of one coin in one currency.
    pub async fn get_simple_price(
        &self,
        id: &CoinId,
        currency: &Currency,
    ) -> Result<f64, HttpError> {
        let params = [
            ("ids", id.as_str().to_string()),
            ("vs_currencies", currency.as_str().to_string()),
        ];
        let resp: SimplePriceResponse = self.get(&self.endpoint("/simple/price", &params)).await?;
        resp.get(id.as_str())
            .and_then(|rates| rates.get(currency.as_str()).copied().flatten())
            .ok_or_else(|| HttpError::NotFound(format!("No {} rate for {}", currency, id)))
    }

    pub async fn get_supported_currencies(&self) -> Result<Vec<String>, HttpError> {
        self.get(&self.endpoint("/simple/supported_vs_currencies", &[]))
            .await
    }

    // ── Exchanges ────────────────────────────────────────────────────────

    pub async fn get_exchanges(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<ExchangeResponse>, HttpError> {
        let mut params = Vec::new();
        if let Some(p) = page {
            params.push(("page", p.to_string()));
        }
        if let Some(pp) = per_page {
            params.push(("per_page", pp.to_string()));
        }
        self.get(&self.endpoint("/exchanges", &params)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// Absolute URL for `path` with URL-encoded query parameters.
    pub(crate) fn endpoint(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{}?{}", url, query);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let config = match &self.retry {
            RetryPolicy::None => return self.do_request(url).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let mut server_delay = None;
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            server_delay = retry_after_ms.map(Duration::from_millis);
                            // waits beyond max_delay are not retried
                            config.retryable_statuses.contains(&429)
                                && server_delay.map_or(true, |d| d <= config.max_delay)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay =
                            server_delay.unwrap_or_else(|| config.delay_for_attempt(attempt));
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!("GET {}", url);

        let key = self.api_key.read().await.clone();
        let mut req = match (&key, self.placement, self.plan.key_param()) {
            (Some(k), KeyPlacement::Query, Some(param)) => {
                self.client.get(with_query_param(url, param, k))
            }
            _ => self.client.get(url),
        };
        if let (Some(k), KeyPlacement::Header, Some(header)) =
            (&key, self.placement, self.plan.key_header())
        {
            req = req.header(header, k.as_str());
        }
        req = req.header("accept", "application/json");

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after_ms);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for MarketDataHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            plan: self.plan,
            placement: self.placement,
            retry: self.retry.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

fn with_query_param(url: &str, param: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, sep, param, urlencoding::encode(value))
}

/// Longest `Retry-After` we report; anything larger is clamped.
const MAX_RETRY_AFTER_SECS: u64 = 24 * 60 * 60;

/// `Retry-After` in seconds → milliseconds. HTTP-date values are ignored.
fn parse_retry_after_ms(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.min(MAX_RETRY_AFTER_SECS) * 1000)
}
