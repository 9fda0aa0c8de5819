//! # Customer Client
//!
//! Profile management and the account-to-customer lookup every storefront call starts with.
use crate::customer_actor::CustomerError;
use crate::model::{AccountId, Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CustomerError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CustomerError::NotFound(id),
            Err(FrameworkError::Conflict(account)) => CustomerError::DuplicateAccount(account),
            Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CustomerClient {
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        params: CustomerCreate,
    ) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// The profile linked to a login account.
    #[instrument(skip(self))]
    pub async fn resolve(&self, account_id: AccountId) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        let filter = Filter::new(move |c: &Customer| c.account_id == account_id);
        self.inner
            .query(filter)
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .next()
            .ok_or(CustomerError::ProfileNotFound(account_id))
    }
}
