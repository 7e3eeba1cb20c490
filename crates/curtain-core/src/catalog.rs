//! Reference data: per-family size envelopes and the mechanism SKUs that
//! can be fitted to each family.
//!
//! The on-disk format is the one the storefront already ships:
//!
//! ```json
//! {
//!   "Roller": {
//!     "medidas permitidas": {
//!       "min": { "ancho": 0.3, "alto": 0.3 },
//!       "max": { "ancho": 3.0, "alto": 2.5, "area": 7.5 }
//!     },
//!     "sistemas": [
//!       { "ancho": 1.5, "alto": 2.0, "sistema": "R150" },
//!       { "ancho": 3.0, "alto": 2.5, "sistema": "R300", "garantia_extendida": true }
//!     ]
//!   }
//! }
//! ```
//!
//! All measures are meters (areas in m²).

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Size limits a family accepts. `None` means unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEnvelope {
    pub min_width: Option<Decimal>,
    pub max_width: Option<Decimal>,
    pub min_height: Option<Decimal>,
    pub max_height: Option<Decimal>,
    pub min_area: Option<Decimal>,
    pub max_area: Option<Decimal>,
}

/// A concrete mechanism SKU covering sizes up to `max_width` × `max_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MechanismOption {
    pub family_key: String,
    pub max_width: Decimal,
    pub max_height: Decimal,
    pub label: String,
    pub has_extended_warranty: bool,
}

/// Immutable catalog. Build it once and hand references to the selector.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    envelopes: BTreeMap<String, FamilyEnvelope>,
    mechanisms: Vec<MechanismOption>,
}

#[derive(Debug, Deserialize)]
struct RawFamily {
    #[serde(rename = "medidas permitidas", default)]
    allowed: RawAllowed,
    #[serde(default)]
    sistemas: Vec<RawMechanism>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAllowed {
    #[serde(default)]
    min: RawBounds,
    #[serde(default)]
    max: RawBounds,
}

#[derive(Debug, Default, Deserialize)]
struct RawBounds {
    ancho: Option<Decimal>,
    alto: Option<Decimal>,
    area: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawMechanism {
    ancho: Decimal,
    alto: Decimal,
    sistema: String,
    #[serde(default)]
    garantia_extendida: bool,
}

type RawCatalog = BTreeMap<String, RawFamily>;

impl Catalog {
    /// Build a catalog from already-typed parts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any envelope or mechanism is
    /// inconsistent. See [`validate_catalog`] for the rules.
    pub fn new(
        envelopes: BTreeMap<String, FamilyEnvelope>,
        mechanisms: Vec<MechanismOption>,
    ) -> Result<Self, ConfigError> {
        let catalog = Self {
            envelopes,
            mechanisms,
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CatalogFileParse` on malformed JSON and
    /// `ConfigError::Validation` on inconsistent data.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = serde_json::from_str(content)
            .map_err(|e| ConfigError::CatalogFileParse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Parse a catalog from YAML with the same shape as the JSON format.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CatalogFileParse` on malformed YAML and
    /// `ConfigError::Validation` on inconsistent data.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawCatalog = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::CatalogFileParse(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, ConfigError> {
        let mut envelopes = BTreeMap::new();
        let mut mechanisms = Vec::new();

        for (family, entry) in raw {
            let envelope = FamilyEnvelope {
                min_width: entry.allowed.min.ancho,
                max_width: entry.allowed.max.ancho,
                min_height: entry.allowed.min.alto,
                max_height: entry.allowed.max.alto,
                min_area: entry.allowed.min.area,
                max_area: entry.allowed.max.area,
            };
            mechanisms.extend(entry.sistemas.into_iter().map(|m| MechanismOption {
                family_key: family.clone(),
                max_width: m.ancho,
                max_height: m.alto,
                label: m.sistema,
                has_extended_warranty: m.garantia_extendida,
            }));
            envelopes.insert(family, envelope);
        }

        Self::new(envelopes, mechanisms)
    }

    /// Resolve a family key to the key stored in the catalog.
    ///
    /// Exact matches win; otherwise both sides are upper-cased the same way
    /// [`crate::normalize_family`] does it, so `"ROLLER"` finds `"Roller"` and
    /// `"PANEL JAPONÉS"` finds `"Panel Japonés"`.
    #[must_use]
    pub fn canonical_key(&self, family: &str) -> Option<&str> {
        if let Some((key, _)) = self.envelopes.get_key_value(family) {
            return Some(key.as_str());
        }
        let wanted = family.to_uppercase();
        self.envelopes
            .keys()
            .find(|k| k.to_uppercase() == wanted)
            .map(String::as_str)
    }

    #[must_use]
    pub fn envelope(&self, family: &str) -> Option<&FamilyEnvelope> {
        self.canonical_key(family)
            .and_then(|key| self.envelopes.get(key))
    }

    /// Mechanisms registered for `family`, in catalog order.
    pub fn mechanisms_for<'a>(
        &'a self,
        family: &str,
    ) -> impl Iterator<Item = &'a MechanismOption> + 'a {
        let key = self.canonical_key(family).map(str::to_owned);
        self.mechanisms
            .iter()
            .filter(move |m| key.as_deref() == Some(m.family_key.as_str()))
    }

    pub fn family_keys(&self) -> impl Iterator<Item = &str> {
        self.envelopes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.envelopes.len()
    }

    #[must_use]
    pub fn mechanism_count(&self) -> usize {
        self.mechanisms.len()
    }
}

/// Load and validate a catalog file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; anything else as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed = if is_yaml {
        Catalog::from_yaml_str(&content)
    } else {
        Catalog::from_json_str(&content)
    };
    let catalog = parsed.inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "catalog rejected");
    })?;

    tracing::info!(
        path = %path.display(),
        families = catalog.family_count(),
        mechanisms = catalog.mechanism_count(),
        "catalog loaded"
    );

    Ok(catalog)
}

/// Check every envelope and mechanism in the catalog.
///
/// Rules: family names are non-empty and unique ignoring case; bounds are
/// non-negative and each min does not exceed its max; mechanisms belong to a
/// known family, have positive ceilings and a non-empty label that is unique
/// within the family.
fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen_families = HashSet::new();

    for (family, envelope) in &catalog.envelopes {
        if family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "family name must be non-empty".to_string(),
            ));
        }

        if !seen_families.insert(family.to_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate family name: '{family}'"
            )));
        }

        validate_bounds(family, "width", envelope.min_width, envelope.max_width)?;
        validate_bounds(family, "height", envelope.min_height, envelope.max_height)?;
        validate_bounds(family, "area", envelope.min_area, envelope.max_area)?;
    }

    let mut seen_labels = HashSet::new();
    for mechanism in &catalog.mechanisms {
        if !catalog.envelopes.contains_key(&mechanism.family_key) {
            return Err(ConfigError::Validation(format!(
                "mechanism '{}' references unknown family '{}'",
                mechanism.label, mechanism.family_key
            )));
        }

        if mechanism.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "family '{}' has a mechanism with an empty label",
                mechanism.family_key
            )));
        }

        if mechanism.max_width <= Decimal::ZERO || mechanism.max_height <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "mechanism '{}' in family '{}' must have positive width and height",
                mechanism.label, mechanism.family_key
            )));
        }

        if !seen_labels.insert((mechanism.family_key.as_str(), mechanism.label.as_str())) {
            return Err(ConfigError::Validation(format!(
                "duplicate mechanism '{}' in family '{}'",
                mechanism.label, mechanism.family_key
            )));
        }
    }

    Ok(())
}

fn validate_bounds(
    family: &str,
    dimension: &str,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Result<(), ConfigError> {
    for bound in [min, max].into_iter().flatten() {
        if bound < Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "family '{family}' has a negative {dimension} bound {bound}"
            )));
        }
    }

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "family '{family}' has min {dimension} {min} greater than max {max}"
            )));
        }
    }

    Ok(())
}

/// Where a [`Catalog`] comes from.
///
/// The storefront fetches reference data from its backend; the CLI reads a
/// file and tests build catalogs in memory.
pub trait CatalogSource {
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog cannot be produced.
    fn load(&self) -> Result<Catalog, ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Catalog, ConfigError> {
        load_catalog(&self.path)
    }
}

/// Serves a catalog that was built ahead of time.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    catalog: Catalog,
}

impl StaticCatalogSource {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> Result<Catalog, ConfigError> {
        Ok(self.catalog.clone())
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
