//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of an actor. Use it to test code that *calls* a resource
//! (a client wrapper, or an actor whose hooks depend on other actors) without running the
//! dependency.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | Scripted replies | Real state management |
//! | **Use Case** | Logic *around* the client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Requires building the failing state |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic, pure mock**: [`create_mock_client`] plus the `expect_*` receiver
//!    helpers let a test inspect each request and answer it by hand.
//! 2. **Single actor**: spawn a real `ResourceActor` with `()` or mocked context.
//! 3. **Actor with mocked dependencies**: a real actor whose context holds clients from
//!    [`MockClient::client`]; see `tests/order_actor_test.rs` in the storefront crate.
//! 4. **Full system**: every actor real; see the storefront crate's `tests/integration_test.rs`.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Till { id: u32 }
//! #[derive(Debug)] struct TillCreate;
//! #[derive(Debug)] struct TillUpdate;
//! #[derive(Debug)] enum TillAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct TillError;
//!
//! #[async_trait]
//! impl ActorEntity for Till {
//!     type Id = u32; type Create = TillCreate; type Update = TillUpdate;
//!     type Action = TillAction; type ActionResult = (); type Context = (); type Error = TillError;
//!     fn from_create_params(id: u32, _: TillCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TillUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TillAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Till>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{MissingPolicy, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply, keyed by the request kind (and id where the request has one).
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Upsert {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Batch {
        response: Result<Vec<Option<T::ActionResult>>, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<I: PartialEq + std::fmt::Debug>(kind: &str, expected: &I, actual: &I) {
    assert_eq!(expected, actual, "{kind} sent for an unexpected id");
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (wrong kind or wrong id) panics the mock task, which surfaces in the test
/// as `ActorDropped`.
///
/// ```ignore
/// let mut mock = MockClient::<Variation>::new();
/// mock.expect_get(VariationId(1)).return_ok(Some(variation));
/// mock.expect_batch().return_ok(vec![Some(level)]);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("get", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        check_id("update", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id("delete", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        check_id("action", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Upsert { id, respond_to, .. }, Some(Expectation::Upsert { id: want, response })) => {
                        check_id("upsert", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Batch { respond_to, .. }, Some(Expectation::Batch { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Query { filter, respond_to }, Some(Expectation::Query { response })) => {
                        // Scripted rows still go through the caller's filter.
                        let response = response
                            .map(|items| items.into_iter().filter(|item| filter.matches(item)).collect::<Vec<_>>());
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Expects an `upsert` operation.
    pub fn expect_upsert(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Upsert { id, response })
    }

    /// Expects a `batch` operation.
    pub fn expect_batch(&mut self) -> ExpectationBuilder<T, Vec<Option<T::ActionResult>>> {
        self.builder(|response| Expectation::Batch { response })
    }

    /// Expects a `query`; the scripted rows are passed through the request's filter.
    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Query { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Finishes an expectation with the reply the mock will send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls each request off the receiver with one of the
/// `expect_*` helpers below, asserts on it, and answers through the responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Batch request
pub async fn expect_batch<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    MissingPolicy,
    oneshot::Sender<Result<Vec<Option<T::ActionResult>>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Batch {
            ops,
            missing,
            respond_to,
        }) => Some((ops, missing, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ActorEntity;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: u32,
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
    }

    #[derive(Debug)]
    struct BinUpdate;

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Bin error")]
    struct BinError;

    #[async_trait]
    impl ActorEntity for Bin {
        type Id = u32;
        type Create = BinCreate;
        type Update = BinUpdate;
        type Action = BinAction;
        type ActionResult = u32;
        type Context = ();
        type Error = BinError;

        fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                units: 0,
            })
        }

        async fn on_update(
            &mut self,
            _update: BinUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: BinAction,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            let BinAction::Take(n) = action;
            Ok(n)
        }
    }

    fn bin(id: u32, units: u32) -> Bin {
        Bin {
            id,
            label: format!("bin-{id}"),
            units,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Bin>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(BinCreate {
                    label: "A1".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "A1");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(id) if id == 1));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Bin>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(bin(1, 4)));
        mock.expect_batch().return_ok(vec![Some(2), None]);

        let client = mock.client();

        let id = client
            .create(BinCreate {
                label: "A1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().units, 4);

        let results = client
            .batch(
                vec![(1, BinAction::Take(2)), (9, BinAction::Take(1))],
                MissingPolicy::Skip,
            )
            .await
            .unwrap();
        assert_eq!(results, vec![Some(2), None]);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_query_applies_filter() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_query()
            .return_ok(vec![bin(1, 0), bin(2, 7), bin(3, 9)]);

        let full = mock
            .client()
            .query(crate::Filter::new(|b: &Bin| b.units > 0))
            .await
            .unwrap();
        assert_eq!(full.len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_wrong_id_drops_reply() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_action(1).return_ok(3);

        let result = mock.client().perform_action(2, BinAction::Take(3)).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
