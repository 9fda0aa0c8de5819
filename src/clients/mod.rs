//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client speaks its resource's language (`reserve`, `add_item`, `cancel_order`) and
//! returns that resource's error type. [`ActorClient`](actor_framework::ActorClient) adds
//! `get`, `delete` and `list`.

pub mod address_client;
pub mod cart_client;
pub mod customer_client;
pub mod inventory_client;
pub mod order_client;

pub use address_client::*;
pub use cart_client::*;
pub use customer_client::*;
pub use inventory_client::*;
pub use order_client::*;
