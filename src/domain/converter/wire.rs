//! Wire types for the simple-price lookup.

use std::collections::HashMap;

/// `/simple/price` response: coin id → currency code → rate.
///
/// The provider sends `null` for a currency it cannot price.
pub type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;
