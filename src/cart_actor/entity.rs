//! [`ActorEntity`] implementation for [`Cart`].

use super::{CartAction, CartActionResult, CartContext, CartError};
use crate::model::{Cart, CartCreate, CartItem, CartItemId, CustomerId, VariationId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

impl Cart {
    async fn available(
        ctx: &CartContext,
        variation_id: VariationId,
    ) -> Result<u32, CartError> {
        ctx.inventory
            .check_stock(variation_id)
            .await
            .map_err(|e| CartError::from_inventory(variation_id, e))
    }

    async fn add_item(
        &mut self,
        variation_id: VariationId,
        quantity: u32,
        ctx: &CartContext,
    ) -> Result<CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let available = Self::available(ctx, variation_id).await?;
        let existing = self.item_for(variation_id).map_or(0, |item| item.quantity);
        let wanted = existing
            .checked_add(quantity)
            .ok_or(CartError::InvalidQuantity(i64::from(quantity)))?;
        if wanted > available {
            return Err(CartError::InsufficientStock {
                variation_id,
                requested: wanted,
                available,
            });
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.variation_id == variation_id)
        {
            item.quantity = wanted;
            return Ok(item.clone());
        }
        let item = CartItem {
            id: ctx.next_item_id(),
            customer_id: self.customer_id,
            variation_id,
            quantity: wanted,
        };
        debug!(customer_id = %self.customer_id, item_id = %item.id, "New cart item");
        self.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(
        &mut self,
        item_id: CartItemId,
        quantity: i64,
        ctx: &CartContext,
    ) -> Result<Option<CartItem>, CartError> {
        let variation_id = self
            .item(item_id)
            .map(|item| item.variation_id)
            .ok_or(CartError::ItemNotFound(item_id))?;
        if quantity <= 0 {
            self.remove(item_id);
            return Ok(None);
        }
        let wanted = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?;
        let available = Self::available(ctx, variation_id).await?;
        if wanted > available {
            return Err(CartError::InsufficientStock {
                variation_id,
                requested: wanted,
                available,
            });
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(CartError::ItemNotFound(item_id))?;
        item.quantity = wanted;
        Ok(Some(item.clone()))
    }

    fn restore(&mut self, items: Vec<CartItem>) -> usize {
        let restored = items.len();
        for taken in items {
            match self
                .items
                .iter_mut()
                .find(|item| item.variation_id == taken.variation_id)
            {
                Some(item) => item.quantity = item.quantity.saturating_add(taken.quantity),
                None => self.items.push(taken),
            }
        }
        restored
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CustomerId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: CustomerId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &Self::Context,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::AddItem {
                variation_id,
                quantity,
            } => self
                .add_item(variation_id, quantity, ctx)
                .await
                .map(CartActionResult::AddItem),
            CartAction::UpdateItem { item_id, quantity } => self
                .update_item(item_id, quantity, ctx)
                .await
                .map(CartActionResult::UpdateItem),
            CartAction::RemoveItem(item_id) => Ok(CartActionResult::RemoveItem(self.remove(item_id))),
            CartAction::Clear => {
                let removed = self.items.len();
                self.items.clear();
                Ok(CartActionResult::Clear(removed))
            }
            CartAction::TakeAll => Ok(CartActionResult::TakeAll(std::mem::take(&mut self.items))),
            CartAction::Restore(items) => {
                let restored = self.restore(items);
                debug!(customer_id = %self.customer_id, restored, "Cart items restored");
                Ok(CartActionResult::Restore(restored))
            }
        }
    }
}
