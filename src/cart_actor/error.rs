//! Error types for the Cart actor.

use crate::inventory_actor::InventoryError;
use crate::model::{CartItemId, VariationId};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The variation being added or updated does not exist.
    #[error("Variation not found: {0}")]
    VariationNotFound(VariationId),

    /// The item is not in this customer's cart.
    #[error("Cart item not found: {0}")]
    ItemNotFound(CartItemId),

    /// The cart would hold more units than are in stock.
    #[error("Insufficient stock for {variation_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variation_id: VariationId,
        requested: u32,
        available: u32,
    },

    /// Adding zero units, or a quantity beyond the counter's range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The stock lookup failed for a reason other than a missing variation.
    #[error("Inventory error: {0}")]
    Inventory(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl CartError {
    pub(crate) fn from_inventory(variation_id: VariationId, e: InventoryError) -> Self {
        match e {
            InventoryError::NotFound(_) => CartError::VariationNotFound(variation_id),
            other => CartError::Inventory(other.to_string()),
        }
    }
}
