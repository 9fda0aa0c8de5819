//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent resource actors on Tokio. Every kind of
//! resource (a stock variation, a cart, an order) is owned by one [`ResourceActor`] task
//! that processes requests one at a time, and is reached through a cloneable
//! [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): domain state and business rules.
//! 2. **Runtime Layer** ([`ResourceActor`]): message processing, the entity store, rollback.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed requests and replies.
//!
//! ## Consistency
//!
//! Because an actor owns its store exclusively, a check-then-mutate inside one request is
//! atomic without locks. On top of that the runtime guarantees:
//!
//! - an `Update` or `Action` whose hook fails leaves the entity exactly as it was;
//! - a `Batch` of actions over several entities is applied all-or-nothing;
//! - an `Upsert` stores a freshly created entity only if the action on it succeeds;
//! - a [`ActorEntity::unique_key`] clash is rejected with [`FrameworkError::Conflict`].
//!
//! ```rust
//! use actor_framework::{ActorEntity, MissingPolicy, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bin { id: u32, units: u32 }
//! #[derive(Debug)] struct BinCreate(u32);
//! #[derive(Debug)] enum BinAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("bin empty")] struct BinError;
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = u32; type Create = BinCreate; type Update = (); type Action = BinAction;
//!     type ActionResult = u32; type Context = (); type Error = BinError;
//!     fn from_create_params(id: u32, p: BinCreate) -> Result<Self, BinError> { Ok(Self { id, units: p.0 }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
//!     async fn handle_action(&mut self, a: BinAction, _: &()) -> Result<u32, BinError> {
//!         let BinAction::Take(n) = a;
//!         self.units = self.units.checked_sub(n).ok_or(BinError)?;
//!         Ok(self.units)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, bins) = ResourceActor::<Bin>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let a = bins.create(BinCreate(3)).await.unwrap();
//!     let b = bins.create(BinCreate(1)).await.unwrap();
//!
//!     // The second take fails, so the first one is rolled back too.
//!     let ops = vec![(a, BinAction::Take(2)), (b, BinAction::Take(5))];
//!     assert!(bins.batch(ops, MissingPolicy::Fail).await.is_err());
//!     assert_eq!(bins.get(a).await.unwrap().unwrap().units, 3);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor starts, through `run(context)`, not at
//! construction. A resource that needs another one (an order reserving stock) receives that
//! resource's client as its context, which avoids construction-order cycles.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations, so an actor can be
//! tested with its dependencies mocked out. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, MissingPolicy, ResourceRequest, Response};
