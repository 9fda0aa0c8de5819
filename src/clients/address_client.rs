//! # Address Client
use crate::address_actor::AddressError;
use crate::model::{Address, AddressCreate, AddressId, AddressUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Address actor.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
}

impl AddressClient {
    pub fn new(inner: ResourceClient<Address>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    type Error = AddressError;

    fn inner(&self) -> &ResourceClient<Address> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<AddressError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AddressError::NotFound(id),
            Err(other) => AddressError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AddressClient {
    #[instrument(skip(self))]
    pub async fn create_address(&self, params: AddressCreate) -> Result<AddressId, AddressError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_address(
        &self,
        id: AddressId,
        update: AddressUpdate,
    ) -> Result<Address, AddressError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// One-line label for shipping, or `None` if the address does not exist.
    #[instrument(skip(self))]
    pub async fn shipping_label(&self, id: AddressId) -> Result<Option<String>, AddressError> {
        Ok(self.get(id).await?.map(|address| address.shipping_label()))
    }
}
