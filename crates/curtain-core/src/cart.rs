//! Quote under construction.
//!
//! Only the line configuration, discount and rounding flag are stored.
//! Prices and totals are recomputed from them on every call to
//! [`Cart::totals`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::discount::{apply_discount_with_step, DiscountSpec};
use crate::fabric::FabricSelection;
use crate::pricing::{compute_line_total, too_large, PriceBreakdown, PricingInput};
use crate::selector::ensure_positive;
use crate::CoreError;

/// One configured curtain row in a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub family: String,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub fabric: Option<FabricSelection>,
    #[serde(default)]
    pub system_price_per_meter: Decimal,
    #[serde(default)]
    pub include_installation: bool,
}

impl LineItem {
    #[must_use]
    pub fn new(
        family: impl Into<String>,
        width_cm: Decimal,
        height_cm: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            family: family.into(),
            width_cm,
            height_cm,
            quantity,
            fabric: None,
            system_price_per_meter: Decimal::ZERO,
            include_installation: false,
        }
    }

    #[must_use]
    pub fn with_fabric(mut self, fabric: FabricSelection) -> Self {
        self.fabric = Some(fabric);
        self
    }

    #[must_use]
    pub fn with_system_price(mut self, price_per_meter: Decimal) -> Self {
        self.system_price_per_meter = price_per_meter;
        self
    }

    #[must_use]
    pub fn with_installation(mut self, include: bool) -> Self {
        self.include_installation = include;
        self
    }

    /// Price this line with the given flat installation fee.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the line is too large to price.
    pub fn price(&self, installation_fee: Decimal) -> Result<PriceBreakdown, CoreError> {
        compute_line_total(&PricingInput {
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            quantity: self.quantity,
            fabric: self.fabric.as_ref(),
            system_price_per_meter: self.system_price_per_meter,
            include_installation: self.include_installation,
            installation_fee,
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        ensure_positive("width", self.width_cm)?;
        ensure_positive("height", self.height_cm)?;
        if self.quantity == 0 {
            return Err(CoreError::InvalidInput(format!(
                "line for '{}' must have a quantity of at least 1",
                self.family
            )));
        }
        if self.system_price_per_meter < Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "system price must not be negative, got {}",
                self.system_price_per_meter
            )));
        }
        if let Some(fabric) = &self.fabric {
            if fabric.price_per_square_meter < Decimal::ZERO {
                return Err(CoreError::InvalidInput(format!(
                    "fabric '{}' has a negative price",
                    fabric.name
                )));
            }
        }
        Ok(())
    }
}

/// Priced view of a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineQuote {
    pub line_id: Uuid,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteTotals {
    pub lines: Vec<LineQuote>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub final_total: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
    discount: Option<DiscountSpec>,
    round_total: bool,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line after validating it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` for non-positive dimensions, a zero
    /// quantity, negative prices, or an id already in the cart.
    pub fn add_line(&mut self, line: LineItem) -> Result<Uuid, CoreError> {
        line.validate()?;
        if self.lines.iter().any(|l| l.id == line.id) {
            return Err(CoreError::InvalidInput(format!(
                "line {} is already in the cart",
                line.id
            )));
        }
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    pub fn remove_line(&mut self, id: Uuid) -> Option<LineItem> {
        let index = self.lines.iter().position(|l| l.id == id)?;
        Some(self.lines.remove(index))
    }

    /// # Errors
    ///
    /// Returns `CoreError::LineNotFound` for an unknown id and
    /// `CoreError::InvalidInput` for a zero quantity.
    pub fn update_quantity(&mut self, id: Uuid, quantity: u32) -> Result<(), CoreError> {
        if quantity == 0 {
            return Err(CoreError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CoreError::LineNotFound(id))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn set_discount(&mut self, discount: Option<DiscountSpec>) {
        self.discount = discount;
    }

    pub fn set_rounding(&mut self, round_total: bool) {
        self.round_total = round_total;
    }

    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if a line or the sum overflows.
    pub fn subtotal(&self, installation_fee: Decimal) -> Result<Decimal, CoreError> {
        self.lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            let line_total = line.price(installation_fee)?.line_total;
            acc.checked_add(line_total).ok_or_else(|| too_large("subtotal"))
        })
    }

    /// Price every line and apply the cart discount.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDiscount` if the discount does not fit the
    /// subtotal, and `CoreError::InvalidInput` for a non-positive step or a
    /// quote too large to total.
    pub fn totals(
        &self,
        installation_fee: Decimal,
        rounding_step: Decimal,
    ) -> Result<QuoteTotals, CoreError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                Ok(LineQuote {
                    line_id: line.id,
                    breakdown: line.price(installation_fee)?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        let subtotal = lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.breakdown.line_total))
            .ok_or_else(|| too_large("subtotal"))?;

        let spec = self.discount.unwrap_or_else(DiscountSpec::none);
        let outcome = apply_discount_with_step(subtotal, spec, self.round_total, rounding_step)?;

        Ok(QuoteTotals {
            lines,
            subtotal,
            discount: outcome.discount,
            final_total: outcome.final_total,
        })
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
