//! Shopping carts.
//!
//! One [`Cart`] per customer, keyed by the customer id. Every item in it is live: setting an
//! item's quantity to zero, removing it, or clearing the cart deletes the item outright.
use super::{CustomerId, Variation, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(CartItemId, "cart_item");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub customer_id: CustomerId,
    pub variation_id: VariationId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub customer_id: CustomerId,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_for(&self, variation_id: VariationId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.variation_id == variation_id)
    }

    /// Removes the item, returning whether anything was removed.
    pub fn remove(&mut self, id: CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}

/// Carts are created on first use; nothing is needed beyond the customer id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCreate;

/// A cart item joined with its variation as it is now.
///
/// `variation_name` and `price` are `None` when the variation has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartItem,
    pub variation_name: Option<String>,
    pub price: Option<Decimal>,
}

impl CartItemView {
    pub fn new(item: CartItem, variation: Option<&Variation>) -> Self {
        Self {
            item,
            variation_name: variation.map(|v| v.name.clone()),
            price: variation.map(|v| v.price),
        }
    }
}
