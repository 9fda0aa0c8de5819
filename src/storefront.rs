//! # Storefront
//!
//! What a logged-in customer can do. Every call starts from the authenticated account,
//! resolves it to a customer profile, and scopes the cart and order operations to that
//! customer. Orders belonging to someone else are reported as not found.
use crate::cart_actor::CartError;
use crate::clients::{CartClient, CustomerClient, InventoryClient, OrderClient};
use crate::customer_actor::CustomerError;
use crate::inventory_actor::InventoryError;
use crate::model::{
    AccountId, AddressId, CartItem, CartItemId, CartItemView, Customer, CustomerId,
    CustomerUpdate, Order, OrderCreate, OrderDetail, OrderId, OrderLineDraft, OrderLineView,
    OrderQuery, OrderStatus, OrderType, PaymentMethodId, VariationId,
};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Nothing in the cart could be turned into an order line.
    #[error("Cart is empty")]
    EmptyCart,
}

/// Options for turning the cart into an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Falls back to the configured default (cash).
    pub payment_method_id: Option<PaymentMethodId>,
    pub note: Option<String>,
    pub address_id: Option<AddressId>,
}

#[derive(Clone)]
pub struct Storefront {
    customers: CustomerClient,
    inventory: InventoryClient,
    carts: CartClient,
    orders: OrderClient,
    default_payment_method: PaymentMethodId,
}

impl Storefront {
    pub fn new(
        customers: CustomerClient,
        inventory: InventoryClient,
        carts: CartClient,
        orders: OrderClient,
        default_payment_method: PaymentMethodId,
    ) -> Self {
        Self {
            customers,
            inventory,
            carts,
            orders,
            default_payment_method,
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve_customer(&self, account_id: AccountId) -> Result<Customer, StorefrontError> {
        Ok(self.customers.resolve(account_id).await?)
    }

    // --- Cart ---

    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        account_id: AccountId,
        variation_id: VariationId,
        quantity: u32,
    ) -> Result<CartItem, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.carts.add_item(customer.id, variation_id, quantity).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        account_id: AccountId,
        item_id: CartItemId,
        quantity: i64,
    ) -> Result<Option<CartItem>, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.carts.update_item(customer.id, item_id, quantity).await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_cart_item(
        &self,
        account_id: AccountId,
        item_id: CartItemId,
    ) -> Result<bool, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.carts.remove_item(customer.id, item_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, account_id: AccountId) -> Result<usize, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.carts.clear(customer.id).await?)
    }

    /// Cart items with each variation's current name and price.
    #[instrument(skip(self))]
    pub async fn cart_items(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<CartItemView>, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        let items = self.carts.items(customer.id).await?;
        Ok(self.inventory.describe_cart(items).await?)
    }

    // --- Orders ---

    /// Turns the cart into an online order priced at today's prices.
    ///
    /// The cart is emptied in the same step it is read, so two checkouts racing on one cart
    /// produce one order; the other sees an empty cart. Items whose variation no longer
    /// exists are dropped. If the order cannot be placed, the taken items go back into the
    /// cart, merged with anything added meanwhile.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        account_id: AccountId,
        request: CheckoutRequest,
    ) -> Result<OrderId, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        let items = self.carts.take_items(customer.id).await?;
        if items.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        match self.place_order(customer.id, &items, request).await {
            Ok(order_id) => {
                info!(%order_id, customer_id = %customer.id, items = items.len(), "Checked out");
                Ok(order_id)
            }
            Err(e) => {
                if let Err(restore) = self.carts.restore_items(customer.id, items).await {
                    warn!(customer_id = %customer.id, error = %restore, "Could not put cart items back");
                }
                Err(e)
            }
        }
    }

    async fn place_order(
        &self,
        customer_id: CustomerId,
        items: &[CartItem],
        request: CheckoutRequest,
    ) -> Result<OrderId, StorefrontError> {
        let ids: Vec<VariationId> = items.iter().map(|item| item.variation_id).collect();
        let variations = self.inventory.variations_by_id(&ids).await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            match variations.get(&item.variation_id) {
                Some(variation) => lines.push(OrderLineDraft {
                    variation_id: variation.id,
                    quantity: item.quantity,
                    unit_price: variation.price,
                }),
                None => warn!(item_id = %item.id, variation_id = %item.variation_id, "Skipping vanished variation"),
            }
        }
        if lines.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let order_id = self
            .orders
            .create_order(OrderCreate {
                customer_id: Some(customer_id),
                employee_id: None,
                address_id: request.address_id,
                payment_method_id: request
                    .payment_method_id
                    .unwrap_or(self.default_payment_method),
                note: request.note,
                order_type: OrderType::Online,
                lines,
            })
            .await?;
        Ok(order_id)
    }

    /// The customer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn my_orders(
        &self,
        account_id: AccountId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        let query = OrderQuery {
            status,
            customer_id: Some(customer.id),
            ..Default::default()
        };
        Ok(self.orders.list_orders(query).await?)
    }

    #[instrument(skip(self))]
    pub async fn my_order(
        &self,
        account_id: AccountId,
        order_id: OrderId,
    ) -> Result<OrderDetail, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        let detail = self.orders.get_order(order_id).await?;
        if !detail.order.is_owned_by(customer.id) {
            return Err(OrderError::NotFound(order_id.to_string()).into());
        }
        Ok(detail)
    }

    #[instrument(skip(self))]
    pub async fn my_order_lines(
        &self,
        account_id: AccountId,
        order_id: OrderId,
    ) -> Result<Vec<OrderLineView>, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        match self.orders.get(order_id).await? {
            Some(order) if order.is_owned_by(customer.id) => {
                Ok(self.orders.describe_lines(order).await?)
            }
            _ => Err(OrderError::NotFound(order_id.to_string()).into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_my_order(
        &self,
        account_id: AccountId,
        order_id: OrderId,
    ) -> Result<Order, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.orders.cancel_for_customer(order_id, customer.id).await?)
    }

    #[instrument(skip(self))]
    pub async fn confirm_received(
        &self,
        account_id: AccountId,
        order_id: OrderId,
    ) -> Result<Order, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        Ok(self.orders.confirm_received(order_id, customer.id).await?)
    }

    // --- Profile ---

    /// Replaces the free-form address kept on the profile.
    #[instrument(skip(self))]
    pub async fn update_profile_address(
        &self,
        account_id: AccountId,
        address: String,
    ) -> Result<Customer, StorefrontError> {
        let customer = self.resolve_customer(account_id).await?;
        let update = CustomerUpdate {
            address: Some(address),
            ..Default::default()
        };
        Ok(self.customers.update_customer(customer.id, update).await?)
    }
}
