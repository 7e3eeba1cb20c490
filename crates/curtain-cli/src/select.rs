use std::path::Path;

use curtain_core::{load_catalog, normalize_family, SelectionResult, SystemSelector};
use rust_decimal::Decimal;

/// Print the mechanism recommendation for one family and size.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the size is not positive.
pub(crate) fn run_select(
    catalog_path: &Path,
    family: &str,
    width: Decimal,
    height: Decimal,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let selector = SystemSelector::new(&catalog);
    let key = normalize_family(family);
    let result = selector.select(&key, width, height)?;

    let resolved = catalog.canonical_key(&key).unwrap_or(key.as_str());
    println!("Family:  {resolved}");
    println!("Size:    {width} x {height} cm");
    println!("System:  {}", describe_selection(&result));

    Ok(())
}

/// One-line, user-facing description of a selection outcome.
pub(crate) fn describe_selection(result: &SelectionResult) -> String {
    match result {
        SelectionResult::Recommended(option) if option.has_extended_warranty => {
            format!("{} (extended warranty)", option.label)
        }
        SelectionResult::Recommended(option) => option.label.clone(),
        SelectionResult::ExceedsMaximum(bound) => {
            format!("exceeds the maximum {bound} for this family")
        }
        SelectionResult::BelowMinimum(bound) => {
            format!("below the minimum {bound}; no recommendation")
        }
        SelectionResult::NoMatch => "no system available for these measurements".to_string(),
    }
}
