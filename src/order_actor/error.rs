//! Error types for the Order actor.

use crate::inventory_actor::InventoryError;
use crate::model::{OrderId, OrderStatus, VariationId};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found (or is not visible to the caller).
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order needs at least one line.
    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Line {line_no}: quantity must be positive")]
    InvalidQuantity { line_no: u32 },

    #[error("Line {line_no}: unit price must not be negative")]
    InvalidPrice { line_no: u32 },

    /// A line asked for more units than are in stock.
    #[error("Insufficient stock for {variation_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variation_id: VariationId,
        requested: u32,
        available: u32,
    },

    /// A line references a variation that does not exist.
    #[error("Variation not found: {0}")]
    VariationNotFound(String),

    /// The order is completed or cancelled and can no longer change.
    #[error("Order {0} is finalized")]
    OrderFinalized(OrderId),

    /// Cancel on an order that is already completed or cancelled.
    #[error("Order {0} is already finalized")]
    AlreadyFinalized(OrderId),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The inventory refused a reservation or release for another reason.
    #[error("Inventory error: {0}")]
    Inventory(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<InventoryError> for OrderError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::InsufficientStock {
                variation_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                variation_id,
                requested,
                available,
            },
            InventoryError::NotFound(id) => OrderError::VariationNotFound(id),
            InventoryError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::Inventory(other.to_string()),
        }
    }
}
