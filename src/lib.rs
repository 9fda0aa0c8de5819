//! # Storefront Ledger
//!
//! Stock, carts and orders for a small online and counter shop, built as a set of resource
//! actors on [`actor_framework`].
//!
//! ## Resources
//!
//! | Actor | Entity | Context |
//! |---|---|---|
//! | [`inventory_actor`] | [`Variation`](model::Variation) | `()` |
//! | [`cart_actor`] | [`Cart`](model::Cart) | [`CartContext`](cart_actor::CartContext) |
//! | [`order_actor`] | [`Order`](model::Order) | [`OrderContext`](order_actor::OrderContext) |
//! | [`customer_actor`] | [`Customer`](model::Customer) | `()` |
//! | [`address_actor`] | [`Address`](model::Address) | `()` |
//!
//! Each actor owns its entities and handles one request at a time, so the stock check and
//! the decrement in `reserve` cannot interleave with another order. Multi-line reservations
//! and releases are single batch requests to the inventory actor, applied all-or-nothing.
//!
//! ## Layers
//!
//! - [`model`]: ids, entities and create/patch payloads.
//! - `*_actor`: business rules as [`ActorEntity`](actor_framework::ActorEntity) impls.
//! - [`clients`]: typed APIs over the actors, one error enum each.
//! - [`storefront`]: customer-scoped operations, checkout.
//! - [`statistics`]: order rollups.
//! - [`lifecycle`]: [`CommerceSystem`](lifecycle::CommerceSystem) starts and stops it all.
//!
//! ## Example
//!
//! ```rust
//! use storefront_ledger::lifecycle::CommerceSystem;
//! use storefront_ledger::model::*;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = CommerceSystem::new();
//!     let shirt = system
//!         .inventory
//!         .create_variation(VariationCreate {
//!             product_id: ProductId(1),
//!             sku: "TEE-M".into(),
//!             name: "Tee / M".into(),
//!             price: Decimal::new(10000, 2),
//!             quantity: 5,
//!             status: VariationStatus::Active,
//!         })
//!         .await
//!         .unwrap();
//!
//!     let order = system
//!         .orders
//!         .create_order(OrderCreate {
//!             lines: vec![OrderLineDraft {
//!                 variation_id: shirt,
//!                 quantity: 2,
//!                 unit_price: Decimal::new(10000, 2),
//!             }],
//!             ..Default::default()
//!         })
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(system.inventory.check_stock(shirt).await.unwrap(), 3);
//!     system.orders.cancel_order(order).await.unwrap();
//!     assert_eq!(system.inventory.check_stock(shirt).await.unwrap(), 5);
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```

pub mod address_actor;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod inventory_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod statistics;
pub mod storefront;
