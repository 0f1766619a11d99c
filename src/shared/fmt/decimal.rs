//! Decimal formatting utilities for human-readable display.
//!
//! Handles `rust_decimal::Decimal` values (converter results) with subscript
//! notation for very small numbers, automatic decimal-place detection and
//! abbreviated suffixes (K/M/B/T).

use super::num::{group_thousands, trim_fraction};
use crate::shared::Currency;
use rust_decimal::prelude::*;

/// Leading fractional zeros above which subscript notation kicks in.
const SUBSCRIPT_THRESHOLD: u32 = 5;

enum DecimalFormat {
    Standard(u32),
    Subscript { zeros: u32, significant: String },
}

#[inline]
fn count_digits_u128(n: u128) -> u32 {
    if n == 0 {
        return 1;
    }
    n.ilog10() + 1
}

fn get_decimal_format(value: &Decimal) -> DecimalFormat {
    let abs_value = value.abs();
    if abs_value.is_zero() || abs_value >= Decimal::ONE {
        return DecimalFormat::Standard(2);
    }

    let mantissa = abs_value.mantissa().unsigned_abs();
    let mantissa_digits = count_digits_u128(mantissa);
    let leading_zeros = abs_value.scale().saturating_sub(mantissa_digits);

    if leading_zeros > SUBSCRIPT_THRESHOLD {
        let mut significant = if mantissa_digits > 4 {
            mantissa / 10u128.pow(mantissa_digits - 4)
        } else {
            mantissa
        };
        while significant > 0 && significant % 10 == 0 {
            significant /= 10;
        }
        DecimalFormat::Subscript {
            zeros: leading_zeros,
            significant: significant.to_string(),
        }
    } else {
        DecimalFormat::Standard(leading_zeros + 4)
    }
}

/// Format a `Decimal` for display, using `0.0(n)ddd` notation for very small values.
pub fn display(value: &Decimal) -> String {
    match get_decimal_format(value) {
        DecimalFormat::Standard(decimals) => {
            let rounded = value.round_dp(decimals).normalize();
            group_thousands(&trim_fraction(&rounded.to_string(), 0))
        }
        DecimalFormat::Subscript { zeros, significant } => {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            format!("{}0.0({}){}", sign, zeros, significant)
        }
    }
}

/// `display` followed by the currency symbol or upper-case code.
pub fn currency(value: &Decimal, currency: &Currency) -> String {
    let body = display(&value.abs());
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    match currency.symbol() {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, body, currency.as_str().to_uppercase()),
    }
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: usize) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();
    let steps: [(Decimal, &str); 5] = [
        (Decimal::ONE, ""),
        (Decimal::from(1_000u64), "K"),
        (Decimal::from(1_000_000u64), "M"),
        (Decimal::from(1_000_000_000u64), "B"),
        (Decimal::from(1_000_000_000_000u64), "T"),
    ];
    let thousand = Decimal::from(1_000u64);
    let mut idx = steps.iter().rposition(|(t, _)| abs_amount >= *t).unwrap_or(0);
    loop {
        let (threshold, suffix) = steps[idx];
        let scaled = (abs_amount / threshold).round_dp(digits as u32);
        if scaled >= thousand && idx + 1 < steps.len() {
            idx += 1;
            continue;
        }
        return format!("{}{:.*}{}", sign, digits, scaled, suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(display(&Decimal::ZERO), "0");
    }

    #[test]
    fn test_display_large_values() {
        assert_eq!(display(&dec("1234.567")), "1,234.57");
        assert_eq!(display(&dec("100")), "100");
        assert_eq!(display(&dec("1.50")), "1.5");
    }

    #[test]
    fn test_display_small_values_standard() {
        assert_eq!(display(&dec("0.1")), "0.1");
        assert_eq!(display(&dec("0.00123")), "0.00123");
        assert_eq!(display(&dec("0.00123456")), "0.001235");
    }

    #[test]
    fn test_display_very_small_values_subscript() {
        assert_eq!(display(&dec("0.0000001")), "0.0(6)1");
        assert_eq!(display(&dec("0.00000012345")), "0.0(6)1234");
        assert_eq!(display(&dec("-0.0000001")), "-0.0(6)1");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(&dec("2500.5"), &Currency::usd()), "$2,500.5");
        assert_eq!(currency(&dec("0.025"), &Currency::new("btc")), "₿0.025");
        assert_eq!(currency(&dec("-3"), &Currency::new("chf")), "-3 CHF");
    }

    #[test]
    fn test_abbr_number() {
        assert_eq!(abbr_number(&dec("999"), 2), "999.00");
        assert_eq!(abbr_number(&dec("1500"), 2), "1.50K");
        assert_eq!(abbr_number(&dec("1500000"), 2), "1.50M");
        assert_eq!(abbr_number(&dec("-1500000"), 2), "-1.50M");
        assert_eq!(abbr_number(&dec("2000000000000"), 1), "2.0T");
    }

    #[test]
    fn test_abbr_number_rounding_carries_to_next_suffix() {
        assert_eq!(abbr_number(&dec("999999"), 2), "1.00M");
        assert_eq!(abbr_number(&dec("999.999"), 2), "1.00K");
        assert_eq!(abbr_number(&dec("999.4"), 0), "999");
    }
}
