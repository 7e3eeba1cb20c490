use rust_decimal::Decimal;
use serde::Serialize;

use crate::fabric::{checked_fabric_area, FabricSelection};
use crate::selector::centimeters_to_meters;
use crate::CoreError;

/// Everything needed to price one configured curtain.
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    pub quantity: u32,
    pub fabric: Option<&'a FabricSelection>,
    /// Mechanism price per linear meter of width.
    pub system_price_per_meter: Decimal,
    pub include_installation: bool,
    pub installation_fee: Decimal,
}

/// Unrounded price components for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub system_price: Decimal,
    pub fabric_price: Decimal,
    pub installation_price: Decimal,
    pub unit_total: Decimal,
    pub line_total: Decimal,
}

/// Compose system, fabric and installation prices for a line.
///
/// No rounding happens here and quantity is not validated; a quantity of
/// zero yields a zero line total.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` if any component does not fit in a
/// `Decimal`.
pub fn compute_line_total(input: &PricingInput<'_>) -> Result<PriceBreakdown, CoreError> {
    let system_price = centimeters_to_meters(input.width_cm)
        .checked_mul(input.system_price_per_meter)
        .ok_or_else(|| too_large("system price"))?;

    let fabric_price = match input.fabric {
        Some(fabric) => checked_fabric_area(input.width_cm, input.height_cm)
            .and_then(|area| area.checked_mul(fabric.price_per_square_meter))
            .ok_or_else(|| too_large("fabric price"))?,
        None => Decimal::ZERO,
    };

    let installation_price = if input.include_installation {
        input.installation_fee
    } else {
        Decimal::ZERO
    };

    let unit_total = system_price
        .checked_add(fabric_price)
        .and_then(|sum| sum.checked_add(installation_price))
        .ok_or_else(|| too_large("unit total"))?;
    let line_total = unit_total
        .checked_mul(Decimal::from(input.quantity))
        .ok_or_else(|| too_large("line total"))?;

    Ok(PriceBreakdown {
        system_price,
        fabric_price,
        installation_price,
        unit_total,
        line_total,
    })
}

pub(crate) fn too_large(what: &str) -> CoreError {
    CoreError::InvalidInput(format!("{what} is too large to compute"))
}
