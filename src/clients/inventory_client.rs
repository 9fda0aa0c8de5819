//! # Inventory Client
//!
//! High-level API for the stock ledger. Wraps a `ResourceClient<Variation>`.
use crate::inventory_actor::{InventoryAction, InventoryError, StockLevel};
use crate::model::{
    CartItem, CartItemView, OrderLine, OrderLineView, ProductId, Variation, VariationCreate,
    VariationId, VariationUpdate,
};
use actor_framework::{ActorClient, Filter, FrameworkError, MissingPolicy, ResourceClient};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Variation>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<Variation>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Variation> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Variation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<InventoryError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => InventoryError::NotFound(id),
            Err(FrameworkError::Conflict(sku)) => InventoryError::DuplicateSku(sku),
            Err(other) => InventoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl InventoryClient {
    #[instrument(skip(self))]
    pub async fn create_variation(
        &self,
        params: VariationCreate,
    ) -> Result<VariationId, InventoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Patches catalog fields; stock counters are untouched.
    #[instrument(skip(self))]
    pub async fn update_variation(
        &self,
        id: VariationId,
        update: VariationUpdate,
    ) -> Result<Variation, InventoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// All variations, or those of one product, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_variations(
        &self,
        product_id: Option<ProductId>,
    ) -> Result<Vec<Variation>, InventoryError> {
        let filter = Filter::new(move |v: &Variation| product_id.map_or(true, |p| v.product_id == p));
        let mut variations = self.inner.query(filter).await.map_err(Self::map_error)?;
        variations.sort_by_key(|v| v.id);
        Ok(variations)
    }

    /// The listed variations that still exist, keyed by id. One round-trip to the actor.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn variations_by_id(
        &self,
        ids: &[VariationId],
    ) -> Result<HashMap<VariationId, Variation>, InventoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let wanted: HashSet<VariationId> = ids.iter().copied().collect();
        let filter = Filter::new(move |v: &Variation| wanted.contains(&v.id));
        let variations = self.inner.query(filter).await.map_err(Self::map_error)?;
        Ok(variations.into_iter().map(|v| (v.id, v)).collect())
    }

    /// Joins cart items with their variation's current name and price.
    pub async fn describe_cart(
        &self,
        items: Vec<CartItem>,
    ) -> Result<Vec<CartItemView>, InventoryError> {
        let ids: Vec<VariationId> = items.iter().map(|item| item.variation_id).collect();
        let variations = self.variations_by_id(&ids).await?;
        Ok(items
            .into_iter()
            .map(|item| {
                let variation = variations.get(&item.variation_id);
                CartItemView::new(item, variation)
            })
            .collect())
    }

    /// Joins order lines with their variation's name.
    pub async fn describe_lines(
        &self,
        lines: Vec<OrderLine>,
    ) -> Result<Vec<OrderLineView>, InventoryError> {
        let ids: Vec<VariationId> = lines.iter().map(|line| line.variation_id).collect();
        let variations = self.variations_by_id(&ids).await?;
        Ok(lines
            .into_iter()
            .map(|line| {
                let variation = variations.get(&line.variation_id);
                OrderLineView::new(line, variation)
            })
            .collect())
    }

    /// Units currently available.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: VariationId) -> Result<u32, InventoryError> {
        Ok(self.stock_level(id).await?.available)
    }

    #[instrument(skip(self))]
    pub async fn stock_level(&self, id: VariationId) -> Result<StockLevel, InventoryError> {
        self.act(id, InventoryAction::CheckStock).await
    }

    #[instrument(skip(self))]
    pub async fn reserve(&self, id: VariationId, qty: u32) -> Result<StockLevel, InventoryError> {
        debug!(qty, "Reserving");
        self.act(id, InventoryAction::Reserve(qty)).await
    }

    /// Puts units back. A variation that no longer exists is skipped (`Ok(None)`).
    #[instrument(skip(self))]
    pub async fn release(
        &self,
        id: VariationId,
        qty: u32,
    ) -> Result<Option<StockLevel>, InventoryError> {
        debug!(qty, "Releasing");
        match self.act(id, InventoryAction::Release(qty)).await {
            Ok(level) => Ok(Some(level)),
            Err(InventoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn adjust(&self, id: VariationId, delta: i64) -> Result<StockLevel, InventoryError> {
        debug!(delta, "Adjusting");
        self.act(id, InventoryAction::Adjust(delta)).await
    }

    /// Reserves every line or none of them. A missing variation fails the whole call.
    #[instrument(skip(self))]
    pub async fn reserve_all(
        &self,
        lines: &[(VariationId, u32)],
    ) -> Result<Vec<StockLevel>, InventoryError> {
        let ops = lines
            .iter()
            .map(|&(id, qty)| (id, InventoryAction::Reserve(qty)))
            .collect();
        self.batch(ops, MissingPolicy::Fail).await
    }

    /// Releases every line or none of them. Missing variations are skipped.
    #[instrument(skip(self))]
    pub async fn release_all(
        &self,
        lines: &[(VariationId, u32)],
    ) -> Result<Vec<StockLevel>, InventoryError> {
        let ops = lines
            .iter()
            .map(|&(id, qty)| (id, InventoryAction::Release(qty)))
            .collect();
        self.batch(ops, MissingPolicy::Skip).await
    }

    async fn act(
        &self,
        id: VariationId,
        action: InventoryAction,
    ) -> Result<StockLevel, InventoryError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    async fn batch(
        &self,
        ops: Vec<(VariationId, InventoryAction)>,
        missing: MissingPolicy,
    ) -> Result<Vec<StockLevel>, InventoryError> {
        let results = self
            .inner
            .batch(ops, missing)
            .await
            .map_err(Self::map_error)?;
        Ok(results.into_iter().flatten().collect())
    }
}
