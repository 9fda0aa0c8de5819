use crate::cart_actor::CartContext;
use crate::clients::{AddressClient, CartClient, CustomerClient, InventoryClient, OrderClient};
use crate::config::Config;
use crate::order_actor::OrderContext;
use crate::storefront::Storefront;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Every resource actor of the store, running, plus the clients to reach them.
///
/// ```ignore
/// let system = CommerceSystem::new();
/// let variation = system.inventory.create_variation(params).await?;
/// let order = system.orders.create_order(order).await?;
/// system.shutdown().await?;
/// ```
pub struct CommerceSystem {
    pub inventory: InventoryClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub customers: CustomerClient,
    pub addresses: AddressClient,
    /// Customer-facing operations built on the clients above.
    pub storefront: Storefront,

    /// Actors with dependencies first, so shutdown awaits them before what they use.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl Default for CommerceSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CommerceSystem {
    /// Starts the system with [`Config::default`]. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let buffer = config.actor_buffer;

        let (inventory_actor, inventory) = crate::inventory_actor::new(buffer);
        let (customer_actor, customers) = crate::customer_actor::new(buffer);
        let (address_actor, addresses) = crate::address_actor::new(buffer);
        let (cart_actor, carts) = crate::cart_actor::new(buffer);
        let (order_actor, orders) = crate::order_actor::new(buffer);

        let inventory = InventoryClient::new(inventory);
        let customers = CustomerClient::new(customers);
        let addresses = AddressClient::new(addresses);
        let carts = CartClient::new(carts);
        let orders = OrderClient::new(orders, addresses.clone(), inventory.clone());

        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            inventory: inventory.clone(),
        }));
        let cart_handle = tokio::spawn(cart_actor.run(CartContext::new(inventory.clone())));
        let inventory_handle = tokio::spawn(inventory_actor.run(()));
        let customer_handle = tokio::spawn(customer_actor.run(()));
        let address_handle = tokio::spawn(address_actor.run(()));

        let storefront = Storefront::new(
            customers.clone(),
            inventory.clone(),
            carts.clone(),
            orders.clone(),
            config.default_payment_method,
        );

        info!(buffer, "Commerce system started");
        Self {
            inventory,
            carts,
            orders,
            customers,
            addresses,
            storefront,
            handles: vec![
                ("orders", order_handle),
                ("carts", cart_handle),
                ("inventory", inventory_handle),
                ("customers", customer_handle),
                ("addresses", address_handle),
            ],
        }
    }

    /// Drops every client and waits for all actors to finish their queued requests.
    ///
    /// Clones of the clients held elsewhere keep their actors alive, and this call waits
    /// until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down commerce system...");

        drop(self.storefront);
        drop(self.orders);
        drop(self.carts);
        drop(self.inventory);
        drop(self.customers);
        drop(self.addresses);

        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(format!("Actor task {name} failed: {e:?}"));
            }
        }

        info!("Commerce system shutdown complete.");
        Ok(())
    }
}
