//! Catalog inspection commands.

use std::path::Path;

use clap::Subcommand;
use curtain_core::{load_catalog, Catalog, FamilyEnvelope};
use rust_decimal::Decimal;

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Validate the catalog file and print a summary
    Check,
    /// List every family with its limits and mechanisms
    List {
        /// Only show this family
        #[arg(long)]
        family: Option<String>,
    },
}

/// # Errors
///
/// Returns an error if the catalog cannot be loaded or validated, or the
/// requested family does not exist.
pub(crate) fn run_catalog(catalog_path: &Path, command: &CatalogCommands) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    match command {
        CatalogCommands::Check => {
            println!(
                "catalog OK: {} families, {} mechanisms ({})",
                catalog.family_count(),
                catalog.mechanism_count(),
                catalog_path.display()
            );
            Ok(())
        }
        CatalogCommands::List { family } => list_families(&catalog, family.as_deref()),
    }
}

fn list_families(catalog: &Catalog, filter: Option<&str>) -> anyhow::Result<()> {
    let families: Vec<&str> = match filter {
        Some(raw) => {
            let key = curtain_core::normalize_family(raw);
            let resolved = catalog
                .canonical_key(&key)
                .ok_or_else(|| anyhow::anyhow!("family '{raw}' not found in catalog"))?;
            vec![resolved]
        }
        None => catalog.family_keys().collect(),
    };

    for family in families {
        let Some(envelope) = catalog.envelope(family) else {
            continue;
        };
        println!("{family}");
        println!("  {}", describe_envelope(envelope));

        let header = format!("  {:<14}{:<10}{:<10}WARRANTY", "SYSTEM", "WIDTH", "HEIGHT");
        println!("{header}");
        for mechanism in catalog.mechanisms_for(family) {
            println!(
                "  {:<14}{:<10}{:<10}{}",
                mechanism.label,
                format!("{} m", mechanism.max_width),
                format!("{} m", mechanism.max_height),
                if mechanism.has_extended_warranty {
                    "extended"
                } else {
                    "standard"
                }
            );
        }
        println!();
    }

    Ok(())
}

fn describe_envelope(envelope: &FamilyEnvelope) -> String {
    format!(
        "width {}  height {}  area {}",
        range(envelope.min_width, envelope.max_width, "m"),
        range(envelope.min_height, envelope.max_height, "m"),
        range(envelope.min_area, envelope.max_area, "m²"),
    )
}

fn range(min: Option<Decimal>, max: Option<Decimal>, unit: &str) -> String {
    match (min, max) {
        (None, None) => "any".to_string(),
        (Some(min), None) => format!(">= {min} {unit}"),
        (None, Some(max)) => format!("<= {max} {unit}"),
        (Some(min), Some(max)) => format!("{min}-{max} {unit}"),
    }
}
