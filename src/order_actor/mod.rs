//! # Order Actor
//!
//! Turns line drafts into persisted orders and runs the order state machine.
//!
//! ## Creation
//!
//! `Order::from_create_params` validates the drafts and computes totals; `Order::on_create`
//! then reserves stock for every line in one inventory batch. Only if that succeeds is the
//! order stored, so an order exists if and only if its stock was taken.
//!
//! ## Finalized orders
//!
//! Once `COMPLETED` or `CANCELLED`, an order rejects every patch (`OrderFinalized`) and a
//! second cancel (`AlreadyFinalized`). Cancelling releases the stock of each line that still
//! points at a variation, again as one batch.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::InventoryClient;
use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub inventory: InventoryClient,
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
