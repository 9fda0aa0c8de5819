//! Custom actions for the Inventory actor.
//!
//! Handled by [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action)
//! on [`Variation`](crate::model::Variation).

use crate::model::VariationId;
use serde::{Deserialize, Serialize};

/// Stock operations on a single variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAction {
    /// Reads the counters without changing them.
    CheckStock,
    /// Takes units for an order.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock.
    Reserve(u32),
    /// Returns units from a cancelled order.
    Release(u32),
    /// Manual correction; negative values are booked as sales.
    Adjust(i64),
}

/// Counters of one variation after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub variation_id: VariationId,
    pub available: u32,
    pub sold: u32,
}
