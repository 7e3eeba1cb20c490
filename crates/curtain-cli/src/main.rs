mod catalog;
mod quote;
mod select;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::catalog::CatalogCommands;

#[derive(Debug, Parser)]
#[command(name = "curtain-cli")]
#[command(about = "Mechanism selection and quote pricing for curtain product lines")]
struct Cli {
    /// Catalog file to use instead of `CURTAIN_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend a mechanism for a family and size
    Select {
        /// Family label as shown in the storefront (e.g. "Roller")
        #[arg(long)]
        family: String,
        /// Width in centimeters
        #[arg(long)]
        width: Decimal,
        /// Height in centimeters
        #[arg(long)]
        height: Decimal,
    },
    /// Price a single curtain configuration
    Price {
        /// Family label; when given, the recommended mechanism is shown too
        #[arg(long)]
        family: Option<String>,
        /// Width in centimeters
        #[arg(long)]
        width: Decimal,
        /// Height in centimeters
        #[arg(long)]
        height: Decimal,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Mechanism price per linear meter of width
        #[arg(long, default_value = "0")]
        system_price: Decimal,
        /// Fabric price per square meter; omit for no fabric
        #[arg(long)]
        fabric_price: Option<Decimal>,
        /// Fabric has no directional pattern and may be rotated
        #[arg(long)]
        rotatable: bool,
        /// Add the configured installation fee to each unit
        #[arg(long)]
        install: bool,
    },
    /// Price a quote file (YAML or JSON)
    Quote {
        file: PathBuf,
        /// Print totals as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect the mechanism catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

fn main() -> anyhow::Result<()> {
    // `--help` and usage errors exit here, before any env var is read.
    let cli = Cli::parse();

    let config = curtain_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_path.clone());

    match cli.command {
        Some(Commands::Select {
            family,
            width,
            height,
        }) => select::run_select(&catalog_path, &family, width, height),
        Some(Commands::Price {
            family,
            width,
            height,
            quantity,
            system_price,
            fabric_price,
            rotatable,
            install,
        }) => quote::run_price(
            &config,
            &catalog_path,
            &quote::PriceArgs {
                family,
                width,
                height,
                quantity,
                system_price,
                fabric_price,
                rotatable,
                install,
            },
        ),
        Some(Commands::Quote { file, json }) => {
            quote::run_quote(&config, &catalog_path, &file, json)
        }
        Some(Commands::Catalog { command }) => catalog::run_catalog(&catalog_path, &command),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
