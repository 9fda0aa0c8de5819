//! # Cart Actor
//!
//! Per-customer shopping carts. The actor stores one [`Cart`] per customer, keyed by the
//! customer id, and creates it on the first `AddItem` (an upsert). Stock is *checked*
//! against the inventory but not reserved: reservation happens at checkout.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`] / [`CartActionResult`]
//! - [`error`] - [`CartError`]
//!
//! ## Context
//!
//! The cart actor needs the inventory to look up stock, and a shared sequence for cart item
//! ids (ids are unique across all carts, not per cart):
//!
//! ```rust,ignore
//! let ctx = CartContext::new(inventory_client.clone());
//! tokio::spawn(cart_actor.run(ctx));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::InventoryClient;
use crate::model::{Cart, CartItemId};
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Dependencies of the cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub inventory: InventoryClient,
    item_ids: Arc<AtomicU32>,
}

impl CartContext {
    pub fn new(inventory: InventoryClient) -> Self {
        Self {
            inventory,
            item_ids: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn next_item_id(&self) -> CartItemId {
        CartItemId(self.item_ids.fetch_add(1, Ordering::Relaxed))
    }
}

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
