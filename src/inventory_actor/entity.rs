//! [`ActorEntity`] implementation for [`Variation`].
//!
//! The ledger rules themselves are the `reserve`/`release`/`adjust` methods on the model;
//! this impl wires them to the actor and validates catalog data.

use super::{InventoryAction, InventoryError, StockLevel};
use crate::model::{Variation, VariationCreate, VariationId, VariationUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate(sku: &str, name: &str, price: Decimal) -> Result<(), InventoryError> {
    if sku.trim().is_empty() {
        return Err(InventoryError::ValidationError("SKU must not be empty".into()));
    }
    if name.trim().is_empty() {
        return Err(InventoryError::ValidationError("name must not be empty".into()));
    }
    if price.is_sign_negative() {
        return Err(InventoryError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Variation {
    type Id = VariationId;
    type Create = VariationCreate;
    type Update = VariationUpdate;
    type Action = InventoryAction;
    type ActionResult = StockLevel;
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: VariationId, params: VariationCreate) -> Result<Self, Self::Error> {
        validate(&params.sku, &params.name, params.price)?;
        Ok(Self {
            id,
            product_id: params.product_id,
            sku: params.sku,
            name: params.name,
            price: params.price.round_dp(2),
            quantity: params.quantity,
            sold: 0,
            status: params.status,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.sku.clone())
    }

    async fn on_update(
        &mut self,
        update: VariationUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price.round_dp(2);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        validate(&self.sku, &self.name, self.price)
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &Self::Context,
    ) -> Result<StockLevel, Self::Error> {
        match action {
            InventoryAction::CheckStock => Ok(self.stock_level()),
            InventoryAction::Reserve(qty) => self.reserve(qty),
            InventoryAction::Release(qty) => self.release(qty),
            InventoryAction::Adjust(delta) => self.adjust(delta),
        }
    }
}
