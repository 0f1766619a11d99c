//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values (prices, caps, volumes as the provider sends them) with
//! automatic decimal-place detection, thousands separators and K/M/B/T suffixes.
//! For `Decimal` formatting, use the `decimal` sibling module.

use crate::shared::Currency;

const SUFFIXES: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Inserts `,` separators into the integer part of an already formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Trims trailing fractional zeros, keeping at least `min_decimals` digits.
pub(crate) fn trim_fraction(formatted: &str, min_decimals: usize) -> String {
    let Some((int_part, frac)) = formatted.split_once('.') else {
        return formatted.to_string();
    };
    let mut keep = frac.trim_end_matches('0').len();
    keep = keep.max(min_decimals.min(frac.len()));
    if keep == 0 {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, &frac[..keep])
    }
}

/// Decimal places for `value`: two above 1, otherwise enough to show four
/// significant digits (capped at 8).
pub fn auto_decimals(value: f64) -> usize {
    let abs = value.abs();
    if abs >= 1.0 || abs == 0.0 || !abs.is_finite() {
        return 2;
    }
    let leading_zeros = (-abs.log10().floor()) as usize - 1;
    (leading_zeros + 4).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
pub fn display(amount: f64) -> String {
    display_with_decimals(amount, auto_decimals(amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    group_thousands(&trim_fraction(&formatted, 0))
}

/// Currency display: `$42,000.10`, `-€5.50`, `0.00123 CHF`.
///
/// Always shows at least two decimals.
pub fn currency(amount: f64, currency: &Currency) -> String {
    let formatted = format!("{:.1$}", amount.abs(), auto_decimals(amount));
    let body = group_thousands(&trim_fraction(&formatted, 2));
    let sign = if amount < 0.0 { "-" } else { "" };
    match currency.symbol() {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, body, currency.as_str().to_uppercase()),
    }
}

/// Abbreviates with K/M/B/T suffixes: `1.50M`, `-2.34B`.
pub fn compact(amount: f64, digits: usize) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let mut idx = SUFFIXES.iter().rposition(|(t, _)| abs >= *t).unwrap_or(0);
    loop {
        let (threshold, suffix) = SUFFIXES[idx];
        let body = format!("{:.*}", digits, abs / threshold);
        // rounding can carry into the next unit: 999.999K is 1.00M
        let carried = body.parse::<f64>().is_ok_and(|v| v >= 1000.0);
        if carried && idx + 1 < SUFFIXES.len() {
            idx += 1;
            continue;
        }
        return format!("{}{}{}", sign, body, suffix);
    }
}

/// Compact currency display for caps and volumes: `$1.23B`.
pub fn compact_currency(amount: f64, currency: &Currency) -> String {
    let body = compact(amount.abs(), 2);
    let sign = if amount < 0.0 { "-" } else { "" };
    match currency.symbol() {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, body, currency.as_str().to_uppercase()),
    }
}

/// Signed percentage with two decimals: `+1.23%`, `-0.50%`, `0.00%`.
pub fn percent_change(pct: f64) -> String {
    let rounded = format!("{:.2}", pct);
    if rounded.trim_start_matches('-') == "0.00" {
        return "0.00%".to_string();
    }
    if pct > 0.0 {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}
