//! Display formatting for prices, market caps, volumes and conversion results.

pub mod decimal;
pub mod num;
