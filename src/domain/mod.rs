//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, display-ready)
//! - `wire.rs` — Raw serde structs matching provider responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `client.rs` — Sub-client with HTTP methods
//!
//! The chart slice adds pure shaping, the zoom reducer, and the controller
//! that owns per-chart state.

pub mod chart;
pub mod coin;
pub mod converter;
pub mod exchange;
