//! Currency converter — coin ↔ fiat amounts at the spot rate.
//!
//! Arithmetic is done in [`Decimal`] so a round trip through both
//! directions does not pick up float noise.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::error::SdkError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the pair `amount` is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    CoinToFiat,
    FiatToCoin,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::CoinToFiat => Direction::FiatToCoin,
            Direction::FiatToCoin => Direction::CoinToFiat,
        }
    }
}

/// Result of one conversion. `rate` is the price of one coin in the fiat currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub direction: Direction,
    pub amount: Decimal,
    pub rate: Decimal,
    pub result: Decimal,
}

impl Conversion {
    pub fn new(direction: Direction, amount: Decimal, rate: Decimal) -> Result<Self, SdkError> {
        if rate <= Decimal::ZERO {
            return Err(SdkError::Validation(format!("Rate must be positive, got {}", rate)));
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SdkError::Validation(format!(
                "Amount must not be negative, got {}",
                amount
            )));
        }

        let result = match direction {
            Direction::CoinToFiat => amount.checked_mul(rate),
            Direction::FiatToCoin => amount.checked_div(rate),
        }
        .ok_or_else(|| SdkError::Validation(format!("{} at rate {} overflows", amount, rate)))?;

        Ok(Self {
            direction,
            amount,
            rate,
            result: result.normalize(),
        })
    }

    /// `amount` coins priced in fiat.
    pub fn coin_to_fiat(amount: Decimal, rate: Decimal) -> Result<Self, SdkError> {
        Self::new(Direction::CoinToFiat, amount, rate)
    }

    /// How many coins `amount` of fiat buys.
    pub fn fiat_to_coin(amount: Decimal, rate: Decimal) -> Result<Self, SdkError> {
        Self::new(Direction::FiatToCoin, amount, rate)
    }

    /// Converts the result back the other way at the same rate.
    pub fn inverse(&self) -> Result<Self, SdkError> {
        Self::new(self.direction.flipped(), self.result, self.rate)
    }
}

/// Provider rates arrive as `f64`; non-finite values are rejected.
pub fn rate_from_f64(rate: f64) -> Result<Decimal, SdkError> {
    Decimal::try_from(rate)
        .map_err(|e| SdkError::Validation(format!("Unusable rate {}: {}", rate, e)))
}
