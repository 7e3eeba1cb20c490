use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::selector::centimeters_to_meters;

/// Fabric chosen for a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricSelection {
    pub name: String,
    pub price_per_square_meter: Decimal,
    /// No directional pattern: the roll may be cut with width and height swapped.
    #[serde(default)]
    pub is_rotatable: bool,
}

/// Billable fabric area in m².
///
/// Rotatable fabric is laid out with the shorter side across the roll. The
/// product is the same either way; see [`cut_width`] for the orientation.
#[must_use]
pub fn fabric_area(width_cm: Decimal, height_cm: Decimal, is_rotatable: bool) -> Decimal {
    let width = centimeters_to_meters(width_cm);
    let height = centimeters_to_meters(height_cm);
    if is_rotatable {
        width.min(height) * width.max(height)
    } else {
        width * height
    }
}

/// [`fabric_area`] that returns `None` instead of overflowing.
pub(crate) fn checked_fabric_area(width_cm: Decimal, height_cm: Decimal) -> Option<Decimal> {
    centimeters_to_meters(width_cm).checked_mul(centimeters_to_meters(height_cm))
}

/// Width of fabric taken across the roll, in meters.
#[must_use]
pub fn cut_width(width_cm: Decimal, height_cm: Decimal, is_rotatable: bool) -> Decimal {
    let width = centimeters_to_meters(width_cm);
    if is_rotatable {
        width.min(centimeters_to_meters(height_cm))
    } else {
        width
    }
}
