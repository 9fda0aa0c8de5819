//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the server half of the actor model. It owns the
//! entity store, processes messages sequentially, and is therefore the only lock the system
//! needs: a check-then-mutate inside one message can never interleave with another request.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{MissingPolicy, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// Each `ResourceActor<T>` runs in its own Tokio task and owns a `HashMap<T::Id, T>`.
/// Requests arrive over an mpsc channel and are answered over oneshot channels.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and client (interface).
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u32, units: u32 }
/// #[derive(Debug)] struct BinCreate { units: u32 }
/// #[derive(Debug)] struct BinUpdate;
/// #[derive(Debug)] enum BinAction { Take(u32) }
/// #[derive(Debug, thiserror::Error)] #[error("empty bin")] struct BinError;
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u32;
///     type Create = BinCreate;
///     type Update = BinUpdate;
///     type Action = BinAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = BinError;
///
///     fn from_create_params(id: u32, p: BinCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, units: p.units })
///     }
///     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: BinAction, _: &()) -> Result<u32, Self::Error> {
///         let BinAction::Take(n) = a;
///         self.units = self.units.checked_sub(n).ok_or(BinError)?;
///         Ok(self.units)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Bin>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(BinCreate { units: 5 }).await.unwrap();
///     assert_eq!(client.perform_action(id, BinAction::Take(2)).await.unwrap(), 3);
///     assert!(client.perform_action(id, BinAction::Take(9)).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next id from the internal counter, `from_create_params`, unique-key check,
///   `on_create`, insert.
/// * **Get**: clone of the stored entity, or `None`.
/// * **Update** / **Action**: the entity is taken out of the store, the hook runs against
///   it, and either the changed entity or the pre-hook snapshot goes back in.
/// * **Delete**: `on_delete`, then removal.
/// * **Upsert**: create under the given id when absent, then apply the action.
/// * **Batch**: sequence of actions; the first failure rolls every touched entity back.
/// * **Query**: clones of all entities accepted by the filter.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the mpsc channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Returns the key of another stored entity that already holds `item`'s unique key.
    fn key_taken(&self, item: &T) -> Option<String> {
        let key = item.unique_key()?;
        self.store
            .values()
            .any(|other| other.unique_key().as_deref() == Some(key.as_str()))
            .then_some(key)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` is handed to every entity hook. It can hold clients of actors that were
    /// created after this one.
    pub async fn run(mut self, context: T::Context) {
        // "Variation" rather than "storefront_ledger::model::variation::Variation"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let result = self.create_entity(id.clone(), params, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|()| id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut item) = self.store.remove(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let snapshot = item.clone();
                    let result = match item.on_update(update, &context).await {
                        Err(e) => Err(entity_error(e)),
                        Ok(()) => match self.key_taken(&item) {
                            Some(key) => Err(FrameworkError::Conflict(key)),
                            None => Ok(()),
                        },
                    };
                    match result {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            self.store.insert(id, item.clone());
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            self.store.insert(id, snapshot);
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(entity_error(e)));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if !self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    }
                    let result = self.apply_action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Upsert {
                    id,
                    params,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Upsert");
                    if self.store.contains_key(&id) {
                        let result = self.apply_action(&id, action, &context).await;
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                        continue;
                    }

                    let result = match self.create_entity(id.clone(), params, &context).await {
                        Err(e) => Err(e),
                        Ok(()) => {
                            let result = self.apply_action(&id, action, &context).await;
                            if result.is_err() {
                                self.store.remove(&id);
                            }
                            result
                        }
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Upsert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Batch {
                    ops,
                    missing,
                    respond_to,
                } => {
                    debug!(entity_type, ops = ops.len(), ?missing, "Batch");
                    let result = self.apply_batch(ops, missing, &context).await;
                    match &result {
                        Ok(results) => info!(entity_type, ops = results.len(), "Batch ok"),
                        Err(e) => warn!(entity_type, error = %e, "Batch rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create_entity(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(), FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        if let Some(key) = self.key_taken(&item) {
            return Err(FrameworkError::Conflict(key));
        }
        item.on_create(context).await.map_err(entity_error)?;
        self.store.insert(id, item);
        Ok(())
    }

    /// Runs one action; the entity is reset to its snapshot if the hook fails.
    async fn apply_action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let Some(item) = self.store.get_mut(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let snapshot = item.clone();
        match item.handle_action(action, context).await {
            Ok(result) => Ok(result),
            Err(e) => {
                *item = snapshot;
                Err(entity_error(e))
            }
        }
    }

    async fn apply_batch(
        &mut self,
        ops: Vec<(T::Id, T::Action)>,
        missing: MissingPolicy,
        context: &T::Context,
    ) -> Result<Vec<Option<T::ActionResult>>, FrameworkError> {
        let mut snapshots: Vec<(T::Id, T)> = Vec::new();
        let mut results = Vec::with_capacity(ops.len());
        let mut failure = None;

        for (id, action) in ops {
            let Some(item) = self.store.get_mut(&id) else {
                match missing {
                    MissingPolicy::Skip => {
                        results.push(None);
                        continue;
                    }
                    MissingPolicy::Fail => {
                        failure = Some(FrameworkError::NotFound(id.to_string()));
                        break;
                    }
                }
            };
            if !snapshots.iter().any(|(seen, _)| seen == &id) {
                snapshots.push((id.clone(), item.clone()));
            }
            match item.handle_action(action, context).await {
                Ok(result) => results.push(Some(result)),
                Err(e) => {
                    failure = Some(entity_error(e));
                    break;
                }
            }
        }

        match failure {
            None => Ok(results),
            Some(e) => {
                for (id, snapshot) in snapshots {
                    self.store.insert(id, snapshot);
                }
                Err(e)
            }
        }
    }
}
