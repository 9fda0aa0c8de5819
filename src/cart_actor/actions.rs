//! Custom actions for the Cart actor.

use crate::model::{CartItem, CartItemId, VariationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds units of a variation, merging into the existing item for it.
    AddItem {
        variation_id: VariationId,
        quantity: u32,
    },
    /// Sets an item's quantity. Zero or less removes the item.
    UpdateItem { item_id: CartItemId, quantity: i64 },
    RemoveItem(CartItemId),
    Clear,
    /// Empties the cart and returns what was in it.
    TakeAll,
    /// Puts taken items back after a checkout that did not go through. An item whose
    /// variation is in the cart again is merged into it.
    Restore(Vec<CartItem>),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartActionResult {
    /// The item as stored after the add.
    AddItem(CartItem),
    /// `None` when the update removed the item.
    UpdateItem(Option<CartItem>),
    /// Whether an item was removed.
    RemoveItem(bool),
    /// How many items were removed.
    Clear(usize),
    TakeAll(Vec<CartItem>),
    /// How many items were put back.
    Restore(usize),
}
