//! Presentation boundary: the only place money gets rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole currency units and group thousands with `.`.
///
/// `format_amount(Decimal::from(111_000), "$")` gives `"$111.000"`.
#[must_use]
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}

/// Area in m² with two decimals.
#[must_use]
pub fn format_area(square_meters: Decimal) -> String {
    let rounded = square_meters.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} m²")
}
