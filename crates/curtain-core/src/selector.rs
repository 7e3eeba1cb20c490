//! Mechanism recommendation for a family and a requested size.
//!
//! The selector first checks the family envelope (maximums before minimums,
//! width before height before area) and only then looks for the smallest
//! mechanism whose ceiling covers the request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MechanismOption};
use crate::normalize::normalize_family;
use crate::CoreError;

/// Which envelope limit a request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Width,
    Height,
    Area,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Width => write!(f, "width"),
            Bound::Height => write!(f, "height"),
            Bound::Area => write!(f, "area"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectionResult {
    Recommended(MechanismOption),
    ExceedsMaximum(Bound),
    /// Below a family minimum. Whether this blocks the order is up to the caller.
    BelowMinimum(Bound),
    /// Unknown family, or no mechanism is large enough.
    NoMatch,
}

impl SelectionResult {
    /// Label of the recommended mechanism, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            SelectionResult::Recommended(option) => Some(option.label.as_str()),
            _ => None,
        }
    }
}

/// One user-entered size, as typed into the order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRequest {
    pub family_raw: String,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct SystemSelector<'a> {
    catalog: &'a Catalog,
}

impl<'a> SystemSelector<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Recommend a mechanism for `family_key` at `width_cm` × `height_cm`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if either dimension is zero or negative.
    pub fn select(
        &self,
        family_key: &str,
        width_cm: Decimal,
        height_cm: Decimal,
    ) -> Result<SelectionResult, CoreError> {
        ensure_positive("width", width_cm)?;
        ensure_positive("height", height_cm)?;

        let width = centimeters_to_meters(width_cm);
        let height = centimeters_to_meters(height_cm);

        let result = self.evaluate(family_key, width, height);
        tracing::debug!(
            family = family_key,
            %width,
            %height,
            ?result,
            "system selection"
        );
        Ok(result)
    }

    /// Normalize the raw family label, then run [`SystemSelector::select`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if either dimension is zero or negative.
    pub fn select_raw(&self, request: &SizeRequest) -> Result<SelectionResult, CoreError> {
        let key = normalize_family(&request.family_raw);
        self.select(&key, request.width_cm, request.height_cm)
    }

    fn evaluate(&self, family_key: &str, width: Decimal, height: Decimal) -> SelectionResult {
        let Some(envelope) = self.catalog.envelope(family_key) else {
            return SelectionResult::NoMatch;
        };
        // None when the product overflows, which is larger than any bound.
        let area = width.checked_mul(height);

        let exceeds = |limit: Option<Decimal>, value: Decimal| limit.is_some_and(|max| value > max);
        let below = |limit: Option<Decimal>, value: Decimal| limit.is_some_and(|min| value < min);

        if exceeds(envelope.max_width, width) {
            return SelectionResult::ExceedsMaximum(Bound::Width);
        }
        if exceeds(envelope.max_height, height) {
            return SelectionResult::ExceedsMaximum(Bound::Height);
        }
        if envelope
            .max_area
            .is_some_and(|max| area.is_none_or(|area| area > max))
        {
            return SelectionResult::ExceedsMaximum(Bound::Area);
        }
        if below(envelope.min_width, width) {
            return SelectionResult::BelowMinimum(Bound::Width);
        }
        if below(envelope.min_height, height) {
            return SelectionResult::BelowMinimum(Bound::Height);
        }
        if area.is_some_and(|area| below(envelope.min_area, area)) {
            return SelectionResult::BelowMinimum(Bound::Area);
        }

        let mut options: Vec<&MechanismOption> = self.catalog.mechanisms_for(family_key).collect();
        options.sort_by(|a, b| {
            a.max_width
                .cmp(&b.max_width)
                .then_with(|| a.max_height.cmp(&b.max_height))
        });

        options
            .into_iter()
            .find(|option| option.max_width >= width && option.max_height >= height)
            .map_or(SelectionResult::NoMatch, |option| {
                SelectionResult::Recommended(option.clone())
            })
    }
}

pub(crate) fn centimeters_to_meters(cm: Decimal) -> Decimal {
    cm / Decimal::ONE_HUNDRED
}

pub(crate) fn ensure_positive(name: &str, value: Decimal) -> Result<(), CoreError> {
    if value <= Decimal::ZERO {
        return Err(CoreError::InvalidInput(format!(
            "{name} must be greater than zero, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
