//! # Generic Messages
//!
//! The message types exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Read-side predicate evaluated inside the actor.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Self(Box::new(|_| true))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// What a batch does when one of its ids is not in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Abort the whole batch with `NotFound`.
    Fail,
    /// Skip the operation; its result slot is `None`.
    Skip,
}

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the lifecycle of a stored resource:
///
/// - **Create** / **Get** / **Update** / **Delete**: plain CRUD.
/// - **Action**: a custom [`ActorEntity::Action`] on one entity.
/// - **Upsert**: create the entity under a caller-chosen id if absent, then apply an action.
///   The entity is only stored when the action succeeds.
/// - **Batch**: several actions applied all-or-nothing. If any step fails, every entity the
///   batch touched is restored to its state before the batch.
/// - **Query**: clones of every entity matching a [`Filter`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Upsert {
        id: T::Id,
        params: T::Create,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Batch {
        ops: Vec<(T::Id, T::Action)>,
        missing: MissingPolicy,
        respond_to: Response<Vec<Option<T::ActionResult>>>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
}
