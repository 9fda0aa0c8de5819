//! # Cart Client
//!
//! High-level API for the Cart actor. All operations are scoped to one customer's cart.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::model::{Cart, CartCreate, CartItem, CartItemId, CustomerId, VariationId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<CartError>()
            .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected cart reply: {result:?}"))
}

impl CartClient {
    /// Adds `quantity` units of a variation, merging with what is already in the cart.
    ///
    /// The combined quantity must not exceed current stock.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        customer_id: CustomerId,
        variation_id: VariationId,
        quantity: u32,
    ) -> Result<CartItem, CartError> {
        debug!("Sending request");
        let action = CartAction::AddItem {
            variation_id,
            quantity,
        };
        match self
            .inner
            .upsert(customer_id, CartCreate, action)
            .await
            .map_err(Self::map_error)?
        {
            CartActionResult::AddItem(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    /// Sets an item's quantity; `quantity <= 0` removes it and returns `None`.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        customer_id: CustomerId,
        item_id: CartItemId,
        quantity: i64,
    ) -> Result<Option<CartItem>, CartError> {
        debug!("Sending request");
        let action = CartAction::UpdateItem { item_id, quantity };
        match self.inner.perform_action(customer_id, action).await {
            Ok(CartActionResult::UpdateItem(item)) => Ok(item),
            Ok(other) => Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => Err(CartError::ItemNotFound(item_id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Returns false when the item was not in the customer's cart.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        customer_id: CustomerId,
        item_id: CartItemId,
    ) -> Result<bool, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(customer_id, CartAction::RemoveItem(item_id))
            .await
        {
            Ok(CartActionResult::RemoveItem(removed)) => Ok(removed),
            Ok(other) => Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Empties the cart, returning how many items were removed.
    #[instrument(skip(self))]
    pub async fn clear(&self, customer_id: CustomerId) -> Result<usize, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(customer_id, CartAction::Clear)
            .await
        {
            Ok(CartActionResult::Clear(removed)) => Ok(removed),
            Ok(other) => Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => Ok(0),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes every item from the cart and returns them in a single actor step.
    ///
    /// Concurrent callers each get a disjoint set of items; the loser of a race gets `[]`.
    #[instrument(skip(self))]
    pub async fn take_items(&self, customer_id: CustomerId) -> Result<Vec<CartItem>, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(customer_id, CartAction::TakeAll)
            .await
        {
            Ok(CartActionResult::TakeAll(items)) => Ok(items),
            Ok(other) => Err(unexpected(other)),
            Err(FrameworkError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Puts items taken by [`CartClient::take_items`] back, merging by variation with
    /// anything added in the meantime.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn restore_items(
        &self,
        customer_id: CustomerId,
        items: Vec<CartItem>,
    ) -> Result<usize, CartError> {
        if items.is_empty() {
            return Ok(0);
        }
        debug!("Sending request");
        match self
            .inner
            .upsert(customer_id, CartCreate, CartAction::Restore(items))
            .await
            .map_err(Self::map_error)?
        {
            CartActionResult::Restore(restored) => Ok(restored),
            other => Err(unexpected(other)),
        }
    }

    /// The customer's items; empty if the customer never had a cart.
    #[instrument(skip(self))]
    pub async fn items(&self, customer_id: CustomerId) -> Result<Vec<CartItem>, CartError> {
        let cart = self.get(customer_id).await?;
        Ok(cart.map(|cart| cart.items).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_remove_from_missing_cart_is_false() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(CustomerId(4))
            .return_err(FrameworkError::NotFound("customer_4".into()));
        let carts = CartClient::new(mock.client());

        assert!(!carts.remove_item(CustomerId(4), CartItemId(1)).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_items_of_missing_cart_is_empty() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(CustomerId(4)).return_ok(None);
        let carts = CartClient::new(mock.client());

        assert!(carts.items(CustomerId(4)).await.unwrap().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_item_goes_through_upsert() {
        let mut mock = MockClient::<Cart>::new();
        let item = CartItem {
            id: CartItemId(1),
            customer_id: CustomerId(4),
            variation_id: VariationId(2),
            quantity: 3,
        };
        mock.expect_upsert(CustomerId(4))
            .return_ok(CartActionResult::AddItem(item.clone()));
        let carts = CartClient::new(mock.client());

        let added = carts
            .add_item(CustomerId(4), VariationId(2), 3)
            .await
            .unwrap();
        assert_eq!(added, item);
        mock.verify();
    }

    #[tokio::test]
    async fn test_take_from_missing_cart_is_empty() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(CustomerId(4))
            .return_err(FrameworkError::NotFound("customer_4".into()));
        let carts = CartClient::new(mock.client());

        assert!(carts.take_items(CustomerId(4)).await.unwrap().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_restore_nothing_skips_actor() {
        let mock = MockClient::<Cart>::new();
        let carts = CartClient::new(mock.client());

        assert_eq!(carts.restore_items(CustomerId(4), Vec::new()).await.unwrap(), 0);
        mock.verify();
    }
}
