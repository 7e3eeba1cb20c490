use std::path::Path;

use anyhow::Context;
use curtain_core::{Cart, DiscountSpec, LineItem};
use serde::Deserialize;

/// On-disk quote: the rows of an order form plus the cart-level discount.
#[derive(Debug, Deserialize)]
pub(crate) struct QuoteFile {
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub discount: Option<DiscountSpec>,
    #[serde(default)]
    pub round: bool,
}

impl QuoteFile {
    pub(crate) fn parse(content: &str, is_yaml: bool) -> anyhow::Result<Self> {
        if is_yaml {
            serde_yaml::from_str(content).context("invalid YAML quote file")
        } else {
            serde_json::from_str(content).context("invalid JSON quote file")
        }
    }

    /// Build a cart, validating every line.
    pub(crate) fn into_cart(self) -> anyhow::Result<Cart> {
        let mut cart = Cart::new();
        for (index, line) in self.lines.into_iter().enumerate() {
            cart.add_line(line)
                .with_context(|| format!("line {} is invalid", index + 1))?;
        }
        cart.set_discount(self.discount);
        cart.set_rounding(self.round);
        Ok(cart)
    }
}

pub(crate) fn load_quote_file(path: &Path) -> anyhow::Result<QuoteFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quote file {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    QuoteFile::parse(&content, is_yaml)
}
