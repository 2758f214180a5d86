//! Projection of wire products into the records the product list renders.

use crate::api::RemoteProduct;
use crate::util::strip_control_chars;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_RATING: f64 = 4.5;
pub const DEFAULT_REVIEWS: u32 = 0;
pub const FEATURED_TAG: &str = "Featured";
pub const FALLBACK_TAG: &str = "Fresh";
/// The listing endpoint carries no price, every card shows the house price.
pub const LIST_PRICE: f64 = 24.99;
pub const WEIGHT_LABEL: &str = "1 lb";

/// A product card as the UI shows it. Built only by [`map_product`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    /// Identifier of the server-side product, used for deduplication.
    pub source_id: String,
    /// Numeric key derived from `source_id`, ordering for the "newest" sort.
    pub synthetic_id: u128,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: Option<String>,
    pub rating: f64,
    pub reviews: u32,
    pub tag: String,
    pub description: String,
    pub weight: &'static str,
}

impl DisplayRecord {
    /// Price formatted for display, e.g. `$24.99`.
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

fn clean(s: &str) -> String {
    strip_control_chars(s.trim()).into_owned()
}

/// Empty strings count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Map a wire product into a display record.
///
/// Missing values fall back to fixed defaults. An empty string, a zero
/// rating and a zero review count are all treated as missing.
pub fn map_product(product: &RemoteProduct) -> DisplayRecord {
    let first_category = product
        .categories
        .first()
        .and_then(|c| present(Some(c.name.as_str())));

    let category = first_category.map(clean).unwrap_or_else(|| UNCATEGORIZED.to_string());

    let rating = product
        .rating
        .filter(|r| r.is_finite() && *r != 0.0)
        .unwrap_or(DEFAULT_RATING);

    let reviews = product
        .reviews
        .filter(|r| *r != 0)
        .unwrap_or(DEFAULT_REVIEWS);

    let tag = match present(product.tag.as_deref()) {
        Some(tag) => clean(tag),
        None if product.featured => FEATURED_TAG.to_string(),
        None => first_category
            .map(clean)
            .unwrap_or_else(|| FALLBACK_TAG.to_string()),
    };

    let name = clean(&product.name);

    let description = match present(product.description.as_deref()) {
        Some(d) => clean(d),
        None => format!(
            "Premium quality {}, fresh and ready to cook.",
            name.to_lowercase()
        ),
    };

    DisplayRecord {
        source_id: product.id.clone(),
        synthetic_id: synthetic_id(&product.id),
        name,
        category,
        price: LIST_PRICE,
        image: present(product.image_url.as_deref()).map(str::to_string),
        rating,
        reviews,
        tag,
        description,
        weight: WEIGHT_LABEL,
    }
}

/// Numeric key from the leading hexadecimal run of an identifier.
///
/// Identifiers such as `65f1c0ffee` yield their hex value; anything without a
/// hex prefix yields 0. Values too large for `u128` saturate.
pub fn synthetic_id(source_id: &str) -> u128 {
    source_id
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u128, |acc, digit| {
            acc.saturating_mul(16).saturating_add(u128::from(digit))
        })
}
