//! Quote-level discount with optional snapping of the final total.
//!
//! When rounding is on, the discount absorbs the rounding delta, so
//! `subtotal - discount == final_total` holds in every case. The discount
//! can therefore end up negative when the total is rounded up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Final totals snap to the nearest thousand unless configured otherwise.
pub const DEFAULT_ROUNDING_STEP: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiscountSpec {
    /// Percent of the subtotal, `0..=100`.
    Percentage { value: Decimal },
    /// Fixed amount in currency units, at most the subtotal.
    Amount { value: Decimal },
}

impl DiscountSpec {
    #[must_use]
    pub fn none() -> Self {
        DiscountSpec::Amount {
            value: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountOutcome {
    pub discount: Decimal,
    pub final_total: Decimal,
}

/// Apply `spec` to `subtotal`, rounding to the nearest [`DEFAULT_ROUNDING_STEP`]
/// when `should_round` is set.
///
/// # Errors
///
/// See [`apply_discount_with_step`].
pub fn apply_discount(
    subtotal: Decimal,
    spec: DiscountSpec,
    should_round: bool,
) -> Result<DiscountOutcome, CoreError> {
    apply_discount_with_step(subtotal, spec, should_round, DEFAULT_ROUNDING_STEP)
}

/// Apply `spec` to `subtotal`, rounding the final total to the nearest
/// multiple of `step` when `should_round` is set. Ties round up.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` for a negative subtotal, a non-positive
/// step, or a total that overflows when rounded. Returns
/// `CoreError::InvalidDiscount` for a negative value, a percentage above 100
/// or an amount above the subtotal.
pub fn apply_discount_with_step(
    subtotal: Decimal,
    spec: DiscountSpec,
    should_round: bool,
    step: Decimal,
) -> Result<DiscountOutcome, CoreError> {
    if subtotal < Decimal::ZERO {
        return Err(CoreError::InvalidInput(format!(
            "subtotal must not be negative, got {subtotal}"
        )));
    }
    if step <= Decimal::ZERO {
        return Err(CoreError::InvalidInput(format!(
            "rounding step must be greater than zero, got {step}"
        )));
    }

    let base_discount = base_discount(subtotal, spec)?;
    let base_total = subtotal - base_discount;

    if !should_round {
        return Ok(DiscountOutcome {
            discount: base_discount,
            final_total: base_total,
        });
    }

    let rounded_total = round_to_step(base_total, step).ok_or_else(|| {
        CoreError::InvalidInput(format!("total {base_total} cannot be rounded to step {step}"))
    })?;
    tracing::debug!(
        %subtotal,
        %base_discount,
        %rounded_total,
        "discount rounded to step"
    );

    Ok(DiscountOutcome {
        discount: subtotal - rounded_total,
        final_total: rounded_total,
    })
}

fn base_discount(subtotal: Decimal, spec: DiscountSpec) -> Result<Decimal, CoreError> {
    match spec {
        DiscountSpec::Percentage { value } => {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(CoreError::InvalidDiscount(format!(
                    "percentage must be between 0 and 100, got {value}"
                )));
            }
            // value / 100 is at most one, so the product never exceeds the subtotal.
            Ok(subtotal * (value / Decimal::ONE_HUNDRED))
        }
        DiscountSpec::Amount { value } => {
            if value < Decimal::ZERO {
                return Err(CoreError::InvalidDiscount(format!(
                    "amount must not be negative, got {value}"
                )));
            }
            if value > subtotal {
                return Err(CoreError::InvalidDiscount(format!(
                    "amount {value} exceeds subtotal {subtotal}"
                )));
            }
            Ok(value)
        }
    }
}

/// Nearest multiple of `step`; exact halves go up.
fn round_to_step(value: Decimal, step: Decimal) -> Option<Decimal> {
    value
        .checked_div(step)?
        .checked_add(Decimal::new(5, 1))?
        .floor()
        .checked_mul(step)
}

#[cfg(test)]
#[path = "discount_test.rs"]
mod tests;
