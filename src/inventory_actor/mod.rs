//! # Inventory Actor
//!
//! The stock ledger. One actor owns every [`Variation`] and is the single place where
//! `quantity` and `sold` change, so "check stock, then take it" is one uninterruptible step.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Variation`]
//! - [`actions`] - [`InventoryAction`] and the [`StockLevel`] every action answers with
//! - [`error`] - [`InventoryError`]
//!
//! ## Operations
//!
//! | Action | Effect | Fails with |
//! |--------|--------|------------|
//! | `Reserve(n)` | `quantity -= n`, `sold += n` | `InsufficientStock`, `InvalidQuantity` |
//! | `Release(n)` | `quantity += n`, `sold -= n` (floored at 0) | |
//! | `Adjust(d)` | `quantity += d`; a negative `d` also adds `|d|` to `sold` | `InvalidAdjustment` |
//! | `CheckStock` | read only | |
//!
//! Multi-variation reservations (an order with several lines) go through
//! [`InventoryClient::reserve_all`](crate::clients::InventoryClient::reserve_all), a single
//! batch that is applied to every variation or to none.
//!
//! ## Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_ledger::clients::InventoryClient;
//! use storefront_ledger::inventory_actor;
//! use storefront_ledger::model::{ProductId, VariationCreate, VariationStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = inventory_actor::new(32);
//!     let inventory = InventoryClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = inventory
//!         .create_variation(VariationCreate {
//!             product_id: ProductId(1),
//!             sku: "MUG-BLUE".to_string(),
//!             name: "Blue mug".to_string(),
//!             price: Decimal::new(1250, 2),
//!             quantity: 10,
//!             status: VariationStatus::Active,
//!         })
//!         .await?;
//!
//!     inventory.reserve(id, 4).await?;
//!     assert_eq!(inventory.check_stock(id).await?, 6);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Variation;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Inventory actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Variation>, ResourceClient<Variation>) {
    ResourceActor::new(buffer_size)
}
