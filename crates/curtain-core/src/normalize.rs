/// Storefront labels that differ from the catalog key, keyed by their
/// trimmed, upper-cased form.
const FAMILY_ALIASES: &[(&str, &str)] = &[
    ("BARCELONA - BANDAS VERTICALES", "Barcelona"),
    ("DUNES - CORTINA TRADICIONAL", "Dunes"),
    ("BARCELONA", "Barcelona"),
    ("DUNES", "Dunes"),
    ("DUBAI", "Dubai"),
    ("ROLLER", "Roller"),
];

/// Map a free-form product family label to its catalog key.
///
/// Unknown labels come back trimmed and upper-cased; the result may not exist
/// in the catalog, so callers still need to handle a missing family.
#[must_use]
pub fn normalize_family(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    FAMILY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map_or(upper, |(_, key)| (*key).to_string())
}
