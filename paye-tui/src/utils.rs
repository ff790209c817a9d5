use rust_decimal::Decimal;

use paye_core::calculations::common::round_half_up;

/// Parses free-text income into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty,
/// whitespace-only, or unparseable input is treated as zero — bad input is
/// never surfaced as an error, only logged.
pub fn parse_income(s: &str) -> Decimal {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "unparseable income treated as zero: {e}");
        Decimal::ZERO
    })
}

/// Formats a monetary value as cedis with thousands separators, rounded to
/// two decimal places for display.
pub fn format_cedis(value: Decimal) -> String {
    let raw = format!("{:.2}", round_half_up(value));
    let negative = raw.starts_with('-');
    let digits = raw.trim_start_matches('-');
    let (int_part, frac_part) = match digits.split_once('.') {
        Some(parts) => parts,
        None => (digits, "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("GH₵ {sign}{grouped}.{frac_part}")
}
