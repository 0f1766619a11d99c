//! Conversion: coin wire types → CoinMarket / CoinDetail (TryFrom + validation).

use super::wire;
use super::{CoinDetail, CoinMarket, CoinMarketData, ValidationError};
use crate::shared::CoinId;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Trims and rejects blank strings.
fn required(value: Option<String>, missing: ValidationError, errors: &mut Vec<ValidationError>) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            errors.push(missing);
            String::new()
        }
    }
}

fn finish<T>(id: &str, errors: Vec<ValidationError>, value: T) -> Result<T, ValidationError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(ValidationError::Multiple(id.to_string(), errors))
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn known_values(map: HashMap<String, Option<f64>>) -> HashMap<String, f64> {
    map.into_iter()
        .filter_map(|(k, v)| v.filter(|v| v.is_finite()).map(|v| (k, v)))
        .collect()
}

impl TryFrom<wire::CoinMarketResponse> for CoinMarket {
    type Error = ValidationError;

    fn try_from(source: wire::CoinMarketResponse) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let id = required(source.id, ValidationError::MissingId, &mut errors);
        let symbol = required(source.symbol, ValidationError::MissingSymbol, &mut errors);
        let name = required(source.name, ValidationError::MissingName, &mut errors);
        let last_updated = parse_timestamp(source.last_updated.as_deref());

        let label = if id.is_empty() { name.clone() } else { id.clone() };
        finish(
            &label,
            errors,
            CoinMarket {
                id: CoinId::new(id),
                symbol,
                name,
                image: source.image,
                current_price: source.current_price,
                market_cap: source.market_cap,
                market_cap_rank: source.market_cap_rank,
                total_volume: source.total_volume,
                high_24h: source.high_24h,
                low_24h: source.low_24h,
                price_change_percentage_24h: source.price_change_percentage_24h,
                circulating_supply: source.circulating_supply,
                last_updated,
            },
        )
    }
}

impl From<wire::CoinMarketDataResponse> for CoinMarketData {
    fn from(source: wire::CoinMarketDataResponse) -> Self {
        Self {
            current_price: known_values(source.current_price),
            market_cap: known_values(source.market_cap),
            total_volume: known_values(source.total_volume),
            high_24h: known_values(source.high_24h),
            low_24h: known_values(source.low_24h),
            price_change_percentage_24h: source.price_change_percentage_24h,
            circulating_supply: source.circulating_supply,
            total_supply: source.total_supply,
            max_supply: source.max_supply,
        }
    }
}

impl TryFrom<wire::CoinDetailResponse> for CoinDetail {
    type Error = ValidationError;

    fn try_from(source: wire::CoinDetailResponse) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let id = required(source.id, ValidationError::MissingId, &mut errors);
        let symbol = required(source.symbol, ValidationError::MissingSymbol, &mut errors);
        let name = required(source.name, ValidationError::MissingName, &mut errors);

        let mut description = source.description;
        let description = description
            .remove("en")
            .flatten()
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        let homepage = source
            .links
            .and_then(|l| l.homepage.into_iter().flatten().find(|h| !h.trim().is_empty()));
        let image = source
            .image
            .and_then(|i| i.large.or(i.small).or(i.thumb));
        let genesis_date = source
            .genesis_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        let market_data = source.market_data.map(CoinMarketData::from).unwrap_or_default();

        let label = if id.is_empty() { name.clone() } else { id.clone() };
        finish(
            &label,
            errors,
            CoinDetail {
                id: CoinId::new(id),
                symbol,
                name,
                description,
                homepage,
                image,
                market_cap_rank: source.market_cap_rank,
                genesis_date,
                market_data,
            },
        )
    }
}
