//! High-level client — `MarketDataClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared configuration, and accessor methods.

use crate::domain::chart::client::Charts;
use crate::domain::chart::ChartTuning;
use crate::domain::coin::client::Coins;
use crate::domain::converter::client::Converter;
use crate::domain::exchange::client::Exchanges;
use crate::error::SdkError;
use crate::http::{MarketDataHttp, PingResponse, RetryPolicy};
use crate::network::{ApiPlan, KeyPlacement};

// Re-export sub-client types for convenience.
pub use crate::domain::chart::client::Charts as ChartsClient;
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::converter::client::Converter as ConverterClient;
pub use crate::domain::exchange::client::Exchanges as ExchangesClient;

/// Environment variable holding the provider API key.
pub const ENV_API_KEY: &str = "COINGECKO_API_KEY";
/// Environment variable selecting the plan: `public`, `demo` or `pro`.
pub const ENV_API_PLAN: &str = "COINGECKO_API_PLAN";
/// Environment variable overriding the base URL.
pub const ENV_API_URL: &str = "COINGECKO_API_URL";

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.charts()`, etc.
#[derive(Clone)]
pub struct MarketDataClient {
    pub(crate) http: MarketDataHttp,
    pub(crate) chart_tuning: ChartTuning,
}

impl MarketDataClient {
    pub fn builder() -> MarketDataClientBuilder {
        MarketDataClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn charts(&self) -> Charts<'_> {
        Charts { client: self }
    }

    pub fn exchanges(&self) -> Exchanges<'_> {
        Exchanges { client: self }
    }

    pub fn converter(&self) -> Converter<'_> {
        Converter { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    /// Low-level HTTP client, for endpoints the sub-clients do not wrap.
    pub fn http(&self) -> &MarketDataHttp {
        &self.http
    }

    pub fn chart_tuning(&self) -> &ChartTuning {
        &self.chart_tuning
    }

    /// Replace the API key at runtime. Clones of this client share the key.
    pub async fn set_api_key(&self, key: Option<String>) {
        self.http.set_api_key(key).await;
    }

    pub async fn ping(&self) -> Result<PingResponse, SdkError> {
        Ok(self.http.ping().await?)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct MarketDataClientBuilder {
    plan: ApiPlan,
    api_key: Option<String>,
    key_placement: KeyPlacement,
    base_url: Option<String>,
    retry_policy: RetryPolicy,
    tuning: ChartTuning,
}

impl MarketDataClientBuilder {
    /// Builder seeded from `COINGECKO_API_KEY`, `COINGECKO_API_PLAN` and
    /// `COINGECKO_API_URL`.
    ///
    /// A key without an explicit plan implies the demo plan.
    pub fn from_env() -> Result<Self, SdkError> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());
        let plan = match std::env::var(ENV_API_PLAN) {
            Ok(raw) => raw
                .parse::<ApiPlan>()
                .map_err(|e| SdkError::Other(format!("{}: {}", ENV_API_PLAN, e)))?,
            Err(_) if api_key.is_some() => ApiPlan::Demo,
            Err(_) => ApiPlan::Public,
        };
        let base_url = std::env::var(ENV_API_URL)
            .ok()
            .filter(|u| !u.trim().is_empty());

        Ok(Self {
            plan,
            api_key,
            base_url,
            ..Self::default()
        })
    }

    pub fn plan(mut self, plan: ApiPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn key_placement(mut self, placement: KeyPlacement) -> Self {
        self.key_placement = placement;
        self
    }

    /// Override the plan's base URL (e.g. a proxy or a local mock).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn tuning(mut self, tuning: ChartTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn build(self) -> Result<MarketDataClient, SdkError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.plan.base_url().to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SdkError::Validation(format!(
                "Base URL must be http(s): {}",
                base_url
            )));
        }

        let http = MarketDataHttp::new(&base_url, self.plan, self.key_placement)?
            .with_retry(self.retry_policy)
            .with_api_key(self.api_key);

        Ok(MarketDataClient {
            http,
            chart_tuning: self.tuning.sanitized(),
        })
    }
}
