//! # Order Client
//!
//! High-level API for the Order actor. Reads that are shown to people (`get_order`) go
//! through a `Reconcile` action so line statuses match a finalized order; `order_lines` is a
//! plain read, joined with variation names from the inventory.
use crate::clients::{AddressClient, InventoryClient};
use crate::model::{
    CustomerId, Order, OrderCreate, OrderDetail, OrderId, OrderLineView, OrderQuery, OrderUpdate,
};
use crate::order_actor::{OrderAction, OrderError};
use crate::statistics::{self, OrderStatistics};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    addresses: AddressClient,
    inventory: InventoryClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        addresses: AddressClient,
        inventory: InventoryClient,
    ) -> Self {
        Self {
            inner,
            addresses,
            inventory,
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    /// Creates the order and reserves its stock in one step. Either both happen or neither.
    #[instrument(skip(self, params), fields(lines = params.lines.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Admin patch of status, note and payment date. Finalized orders reject it.
    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Cancels any open order and returns its stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Cancel { requested_by: None })
            .await
    }

    /// Cancel on behalf of a customer; someone else's order reads as not found.
    #[instrument(skip(self))]
    pub async fn cancel_for_customer(
        &self,
        id: OrderId,
        customer_id: CustomerId,
    ) -> Result<Order, OrderError> {
        self.act(
            id,
            OrderAction::Cancel {
                requested_by: Some(customer_id),
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn confirm_received(
        &self,
        id: OrderId,
        customer_id: CustomerId,
    ) -> Result<Order, OrderError> {
        self.act(id, OrderAction::ConfirmReceived { customer_id })
            .await
    }

    /// The order with reconciled lines and its shipping address as one line.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<OrderDetail, OrderError> {
        let order = self.act(id, OrderAction::Reconcile).await?;
        let shipping_address = match order.address_id {
            Some(address_id) => self
                .addresses
                .shipping_label(address_id)
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?,
            None => None,
        };
        Ok(OrderDetail {
            order,
            shipping_address,
        })
    }

    /// Stored lines as they are, each with its variation's name (`None` once deleted).
    #[instrument(skip(self))]
    pub async fn order_lines(&self, id: OrderId) -> Result<Vec<OrderLineView>, OrderError> {
        let order = self
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        self.describe_lines(order).await
    }

    /// Joins an already-fetched order's lines with variation names.
    pub async fn describe_lines(&self, order: Order) -> Result<Vec<OrderLineView>, OrderError> {
        Ok(self.inventory.describe_lines(order.lines).await?)
    }

    /// Matching orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let filter = Filter::new(move |order: &Order| query.matches(order));
        let mut orders = self.inner.query(filter).await.map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Totals over orders whose `order_date` falls in `[start, end]`.
    #[instrument(skip(self))]
    pub async fn statistics(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<OrderStatistics, OrderError> {
        let orders = self
            .list_orders(OrderQuery {
                start,
                end,
                ..Default::default()
            })
            .await?;
        Ok(statistics::summarize(&orders))
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Address, AddressId, OrderLineDraft, OrderStatus, ProductId, Variation, VariationId,
        VariationStatus,
    };
    use actor_framework::mock::MockClient;
    use actor_framework::ActorEntity;
    use rust_decimal_macros::dec;

    fn order(id: u32, address: Option<u32>) -> Order {
        let params = OrderCreate {
            address_id: address.map(AddressId),
            lines: vec![OrderLineDraft {
                variation_id: VariationId(1),
                quantity: 2,
                unit_price: dec!(100),
            }],
            ..Default::default()
        };
        Order::from_create_params(OrderId(id), params).unwrap()
    }

    fn client(
        orders: &MockClient<Order>,
        addresses: &MockClient<Address>,
        inventory: &MockClient<Variation>,
    ) -> OrderClient {
        OrderClient::new(
            orders.client(),
            AddressClient::new(addresses.client()),
            InventoryClient::new(inventory.client()),
        )
    }

    #[tokio::test]
    async fn test_get_order_spells_out_address() {
        let mut orders = MockClient::<Order>::new();
        let mut addresses = MockClient::<Address>::new();
        orders.expect_action(OrderId(1)).return_ok(order(1, Some(7)));
        addresses.expect_get(AddressId(7)).return_ok(Some(Address {
            id: AddressId(7),
            street: Some("1 Trang Tien".into()),
            province: Some("Ha Noi".into()),
            ..Default::default()
        }));
        let client = client(&orders, &addresses, &MockClient::new());

        let detail = client.get_order(OrderId(1)).await.unwrap();
        assert_eq!(detail.shipping_address.as_deref(), Some("1 Trang Tien, Ha Noi"));
        assert_eq!(detail.order.total_amount, dec!(200));
        orders.verify();
        addresses.verify();
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let mut orders = MockClient::<Order>::new();
        let addresses = MockClient::<Address>::new();
        orders
            .expect_action(OrderId(5))
            .return_err(FrameworkError::NotFound("order_5".into()));
        let client = client(&orders, &addresses, &MockClient::new());

        let err = client.get_order(OrderId(5)).await.unwrap_err();
        assert_eq!(err, OrderError::NotFound("order_5".into()));
    }

    #[tokio::test]
    async fn test_list_orders_filters_by_status() {
        let mut orders = MockClient::<Order>::new();
        let addresses = MockClient::<Address>::new();
        let mut done = order(2, None);
        done.finalize(OrderStatus::Completed);
        orders.expect_query().return_ok(vec![order(1, None), done]);
        let client = client(&orders, &addresses, &MockClient::new());

        let listed = client
            .list_orders(OrderQuery {
                status: Some(OrderStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, OrderId(2));
    }

    #[tokio::test]
    async fn test_finalized_error_survives_transport() {
        let mut orders = MockClient::<Order>::new();
        let addresses = MockClient::<Address>::new();
        orders.expect_update(OrderId(3)).return_err(FrameworkError::EntityError(Box::new(
            OrderError::OrderFinalized(OrderId(3)),
        )));
        let client = client(&orders, &addresses, &MockClient::new());

        let err = client
            .update_order(OrderId(3), OrderUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::OrderFinalized(OrderId(3)));
    }

    #[tokio::test]
    async fn test_order_lines_name_only_live_variations() {
        let mut orders = MockClient::<Order>::new();
        let addresses = MockClient::<Address>::new();
        let mut inventory = MockClient::<Variation>::new();
        orders.expect_get(OrderId(4)).return_ok(Some(order(4, None)));
        inventory.expect_query().return_ok(vec![Variation {
            id: VariationId(2),
            product_id: ProductId(1),
            sku: "MUG".into(),
            name: "Mug".into(),
            price: dec!(9),
            quantity: 1,
            sold: 0,
            status: VariationStatus::Active,
        }]);
        let client = client(&orders, &addresses, &inventory);

        // The order sold variation 1, which the inventory no longer has.
        let lines = client.order_lines(OrderId(4)).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line.variation_id, VariationId(1));
        assert_eq!(lines[0].variation_name, None);
        assert_eq!(lines[0].line.price, dec!(200));
        orders.verify();
        inventory.verify();
    }
}
