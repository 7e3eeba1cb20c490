//! Pricing command handlers: a single configuration (`price`) or a whole
//! quote file (`quote`).
//!
//! Lines whose size has no recommended mechanism are still priced; the
//! selection outcome is printed next to them and logged as a warning.

mod file;

use std::path::Path;

use curtain_core::{
    cut_width, fabric_area, format_amount, format_area, load_catalog, AppConfig, FabricSelection,
    LineItem, SelectionResult, SizeRequest, SystemSelector,
};
use rust_decimal::Decimal;

use crate::select::describe_selection;

pub(crate) use file::load_quote_file;

#[derive(Debug)]
pub(crate) struct PriceArgs {
    pub family: Option<String>,
    pub width: Decimal,
    pub height: Decimal,
    pub quantity: u32,
    pub system_price: Decimal,
    pub fabric_price: Option<Decimal>,
    pub rotatable: bool,
    pub install: bool,
}

/// Price one configuration and print the breakdown.
///
/// # Errors
///
/// Returns an error if the catalog is needed but cannot be loaded, or the
/// configuration is invalid.
pub(crate) fn run_price(
    config: &AppConfig,
    catalog_path: &Path,
    args: &PriceArgs,
) -> anyhow::Result<()> {
    let family = args.family.clone().unwrap_or_default();
    let mut line = LineItem::new(family.clone(), args.width, args.height, args.quantity)
        .with_system_price(args.system_price)
        .with_installation(args.install);
    if let Some(price) = args.fabric_price {
        line = line.with_fabric(FabricSelection {
            name: "fabric".to_string(),
            price_per_square_meter: price,
            is_rotatable: args.rotatable,
        });
    }

    let mut cart = curtain_core::Cart::new();
    cart.add_line(line.clone())?;

    if args.family.is_some() {
        let catalog = load_catalog(catalog_path)?;
        let selection = SystemSelector::new(&catalog).select_raw(&SizeRequest {
            family_raw: family,
            width_cm: args.width,
            height_cm: args.height,
        })?;
        println!("System:        {}", describe_selection(&selection));
    }

    let symbol = config.currency_symbol.as_str();
    let breakdown = line.price(config.installation_fee)?;
    if args.fabric_price.is_some() {
        println!(
            "Fabric area:   {} (cut width {} m)",
            format_area(fabric_area(args.width, args.height, args.rotatable)),
            cut_width(args.width, args.height, args.rotatable)
        );
    }
    println!("System price:  {}", format_amount(breakdown.system_price, symbol));
    println!("Fabric price:  {}", format_amount(breakdown.fabric_price, symbol));
    println!(
        "Installation:  {}",
        format_amount(breakdown.installation_price, symbol)
    );
    println!("Unit total:    {}", format_amount(breakdown.unit_total, symbol));
    println!(
        "Line total:    {} (x{})",
        format_amount(breakdown.line_total, symbol),
        args.quantity
    );

    Ok(())
}

/// Price every line of a quote file and print the quote.
///
/// # Errors
///
/// Returns an error if the catalog or quote file cannot be loaded, a line is
/// invalid, or the discount does not fit the subtotal.
pub(crate) fn run_quote(
    config: &AppConfig,
    catalog_path: &Path,
    quote_path: &Path,
    as_json: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let selector = SystemSelector::new(&catalog);
    let cart = load_quote_file(quote_path)?.into_cart()?;

    let mut systems = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let selection = selector.select_raw(&SizeRequest {
            family_raw: line.family.clone(),
            width_cm: line.width_cm,
            height_cm: line.height_cm,
        })?;
        if !matches!(selection, SelectionResult::Recommended(_)) {
            tracing::warn!(
                family = %line.family,
                width_cm = %line.width_cm,
                height_cm = %line.height_cm,
                outcome = %describe_selection(&selection),
                "line has no recommended system"
            );
        }
        systems.push(selection);
    }

    let totals = cart.totals(config.installation_fee, config.rounding_step)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    let symbol = config.currency_symbol.as_str();
    println!("Quote date: {}", chrono::Local::now().date_naive());
    println!();
    let header = format!(
        "{:<32}{:<14}{:<5}{:<34}{:>14}{:>14}",
        "FAMILY", "SIZE (CM)", "QTY", "SYSTEM", "UNIT", "TOTAL"
    );
    println!("{header}");
    for ((line, priced), selection) in cart.lines().iter().zip(&totals.lines).zip(&systems) {
        println!(
            "{:<32}{:<14}{:<5}{:<34}{:>14}{:>14}",
            truncate(&line.family, 30),
            format!("{}x{}", line.width_cm, line.height_cm),
            line.quantity,
            truncate(&describe_selection(selection), 32),
            format_amount(priced.breakdown.unit_total, symbol),
            format_amount(priced.breakdown.line_total, symbol),
        );
    }
    println!();
    println!("{:<85}{:>28}", "Subtotal", format_amount(totals.subtotal, symbol));
    println!("{:<85}{:>28}", "Discount", format_amount(totals.discount, symbol));
    println!("{:<85}{:>28}", "Total", format_amount(totals.final_total, symbol));

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}
