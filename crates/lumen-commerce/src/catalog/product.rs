//! Product snapshot as returned by the listing service.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// An immutable product snapshot.
///
/// Everything except identity, naming and price is optional on the wire;
/// absent booleans read as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub brand: String,
    /// Current selling price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Pre-discount price, shown struck through.
    #[serde(
        default,
        with = "money::decimal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub old_price: Option<Money>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub stock_quantity: i64,

    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub pickup_available: bool,
    #[serde(default)]
    pub has_remote: bool,
    #[serde(default)]
    pub is_dimmable: bool,
    #[serde(default)]
    pub has_color_change: bool,

    #[serde(flatten)]
    pub specs: ProductSpecs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
}

/// Physical attributes of a fixture.
///
/// Dimensions are in centimetres, power in watts, voltage in volts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_length: Option<f64>,
}

impl Product {
    /// Create a product with the required fields; everything else defaults.
    pub fn new(id: ProductId, name: impl Into<String>, category: Category, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            brand: String::new(),
            price,
            old_price: None,
            description: String::new(),
            image_url: String::new(),
            additional_images: Vec::new(),
            stock_quantity: 0,
            is_new: false,
            is_sale: false,
            pickup_available: false,
            has_remote: false,
            is_dimmable: false,
            has_color_change: false,
            specs: ProductSpecs::default(),
            rating: None,
            reviews_count: None,
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Whether the add-to-cart action should be offered.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Discount against `old_price`, rounded to a whole percent.
    pub fn discount_percent(&self) -> Option<u32> {
        let old = self.old_price?;
        if old.currency != self.price.currency || old.amount_minor <= self.price.amount_minor {
            return None;
        }
        let saved = (old.amount_minor - self.price.amount_minor) as f64;
        Some((saved / old.amount_minor as f64 * 100.0).round() as u32)
    }

    /// All images, primary first.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image_url.as_str())
            .filter(|url| !url.is_empty())
            .chain(self.additional_images.iter().map(String::as_str))
    }
}
