//! # coinscope
//!
//! A market-data SDK for crypto dashboards, supporting both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, formatters, domain models, chart shaping and zoom state
//!    (always available, WASM-safe, no I/O)
//! 2. **HTTP API** — `MarketDataHttp` with an opt-in retry policy
//! 3. **High-Level Client** — `MarketDataClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinscope::prelude::*;
//!
//! let client = MarketDataClient::builder()
//!     .plan(ApiPlan::Demo)
//!     .api_key("CG-...")
//!     .build()?;
//!
//! let coins = client.coins().markets(&Currency::usd(), Some(1), Some(50)).await?;
//!
//! let mut chart = ChartController::new(ChartSelection::new("bitcoin"));
//! chart.refresh(&client.charts()).await;
//! chart.gesture(GestureEvent::PointerEnter);
//! chart.gesture(GestureEvent::Wheel { delta_y: -120.0 });
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatters used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and provider plans.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `MarketDataClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ChartMode, ChartType, CoinId, Currency, DataType, Timeframe};

    // Domain types — chart
    pub use crate::domain::chart::{
        ChartController, ChartFailure, ChartSelection, ChartStatus, ChartTuning, FailureKind,
        GestureEvent, Reduced, RequestTicket, TimeSeriesPoint, ZoomBounds, ZoomContext, ZoomState,
        ZoomWindow,
    };

    // Domain types — coin, exchange, converter
    pub use crate::domain::coin::{CoinDetail, CoinMarket, CoinMarketData};
    pub use crate::domain::converter::{Conversion, Direction};
    pub use crate::domain::exchange::Exchange;

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{ApiPlan, KeyPlacement, DEFAULT_API_URL, PRO_API_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ChartsClient, CoinsClient, ConverterClient, ExchangesClient, MarketDataClient,
        MarketDataClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
