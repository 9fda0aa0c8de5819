//! Error types for the Inventory actor.

use crate::model::VariationId;
use thiserror::Error;

/// Errors that can occur during stock operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// The requested variation was not found.
    #[error("Variation not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {variation_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variation_id: VariationId,
        requested: u32,
        available: u32,
    },

    /// An adjustment would take the shelf count below zero (or past the counter's range).
    #[error("Invalid adjustment for {variation_id}: {delta} against {available} available")]
    InvalidAdjustment {
        variation_id: VariationId,
        delta: i64,
        available: u32,
    },

    /// The provided quantity is invalid (zero, or overflowing the counter).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Another variation already uses this SKU.
    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    /// The variation data provided is invalid.
    #[error("Variation validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for InventoryError {
    fn from(msg: String) -> Self {
        InventoryError::ActorCommunicationError(msg)
    }
}
