//! Mechanism selection and quote pricing for curtain and blind product lines.

pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod discount;
pub mod display;
pub mod fabric;
pub mod normalize;
pub mod pricing;
pub mod selector;

use thiserror::Error;
use uuid::Uuid;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, LineItem, LineQuote, QuoteTotals};
pub use catalog::{
    load_catalog, Catalog, CatalogSource, FamilyEnvelope, FileCatalogSource, MechanismOption,
    StaticCatalogSource,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use discount::{
    apply_discount, apply_discount_with_step, DiscountOutcome, DiscountSpec,
    DEFAULT_ROUNDING_STEP,
};
pub use display::{format_amount, format_area};
pub use fabric::{cut_width, fabric_area, FabricSelection};
pub use normalize::normalize_family;
pub use pricing::{compute_line_total, PriceBreakdown, PricingInput};
pub use selector::{Bound, SelectionResult, SizeRequest, SystemSelector};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    #[error("line item not found: {0}")]
    LineNotFound(Uuid),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(String),

    #[error("catalog validation error: {0}")]
    Validation(String),
}
