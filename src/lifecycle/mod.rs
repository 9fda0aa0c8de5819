//! # System Lifecycle
//!
//! Starts every resource actor, wires the ones that depend on each other, and shuts them
//! down again.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when they are started
//! (`run(context)`):
//!
//! ```text
//! customers   ()
//! addresses   ()
//! inventory   ()
//! carts       CartContext { inventory }
//! orders      OrderContext { inventory }
//! ```
//!
//! The graph is acyclic, so dropping every client is enough to stop the system: the cart
//! and order actors exit first, which drops the inventory clients in their contexts, and
//! the inventory actor follows.

pub mod commerce_system;

pub use commerce_system::*;
