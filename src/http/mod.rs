//! HTTP client layer — `MarketDataHttp` with an opt-in retry policy.

pub mod client;
pub mod retry;

pub use client::{MarketDataHttp, PingResponse};
pub use retry::{RetryConfig, RetryPolicy};
