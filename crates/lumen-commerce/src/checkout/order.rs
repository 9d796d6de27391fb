//! Order payloads.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Body of an order placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Signed-in customer, `null` for guest checkout.
    pub user_id: Option<UserId>,
    pub items: Vec<OrderLine>,
    #[serde(with = "money::decimal")]
    pub total_amount: Money,
}

/// One line of an order request; `price` is the unit price at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "money::decimal")]
    pub price: Money,
}

impl OrderRequest {
    /// Snapshot a cart into an order request.
    pub fn from_cart(cart: &Cart, user_id: Option<UserId>) -> Result<Self, CommerceError> {
        let items = cart
            .items()
            .iter()
            .map(|entry| OrderLine {
                product_id: entry.product.id,
                quantity: entry.quantity,
                price: entry.product.price,
            })
            .collect();

        Ok(Self {
            user_id,
            items,
            total_amount: cart.total_price()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An order as acknowledged by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(with = "money::decimal")]
    pub total_amount: Money,
    #[serde(default)]
    pub status: String,
    /// Server timestamp, passed through verbatim.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// A line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "money::decimal")]
    pub price: Money,
}
