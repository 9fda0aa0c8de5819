//! Demo run: a customer fills a cart, checks out, and the shop works the order through to
//! completion. Another order is cancelled to show the stock coming back.

use actor_framework::tracing::setup_tracing;
use rust_decimal::Decimal;
use storefront_ledger::config::Config;
use storefront_ledger::lifecycle::CommerceSystem;
use storefront_ledger::model::{
    AccountId, AddressCreate, CustomerCreate, OrderCreate, OrderLineDraft, OrderStatus,
    OrderUpdate, ProductId, VariationCreate, VariationStatus,
};
use storefront_ledger::storefront::CheckoutRequest;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    setup_tracing(&config.log_filter);

    info!(?config, "Starting storefront ledger");
    let system = CommerceSystem::with_config(&config);

    let account = AccountId(1001);
    let customer_id = system
        .customers
        .create_customer(CustomerCreate {
            account_id: account,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: None,
            address: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    let address_id = system
        .addresses
        .create_address(AddressCreate {
            customer_id: Some(customer_id),
            street: Some("12 Hang Bai".to_string()),
            district: Some("Hoan Kiem".to_string()),
            province: Some("Ha Noi".to_string()),
            ..Default::default()
        })
        .await
        .map_err(|e| e.to_string())?;

    let mut variations = Vec::new();
    for (sku, price, quantity) in [("TEE-RED-M", 19_900, 10), ("MUG-WHITE", 8_500, 3)] {
        let id = system
            .inventory
            .create_variation(VariationCreate {
                product_id: ProductId(1),
                sku: sku.to_string(),
                name: sku.to_lowercase(),
                price: Decimal::new(price, 2),
                quantity,
                status: VariationStatus::Active,
            })
            .await
            .map_err(|e| e.to_string())?;
        variations.push(id);
    }

    let span = tracing::info_span!("checkout", %account);
    let order_id = async {
        for &variation_id in &variations {
            system
                .storefront
                .add_to_cart(account, variation_id, 2)
                .await
                .map_err(|e| e.to_string())?;
        }
        let request = CheckoutRequest {
            address_id: Some(address_id),
            ..Default::default()
        };
        system
            .storefront
            .checkout(account, request)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("fulfilment", %order_id);
    async {
        let processing = OrderUpdate {
            status: Some(OrderStatus::Processing),
            ..Default::default()
        };
        system
            .orders
            .update_order(order_id, processing)
            .await
            .map_err(|e| e.to_string())?;
        system
            .storefront
            .confirm_received(account, order_id)
            .await
            .map_err(|e| e.to_string())?;
        let detail = system
            .orders
            .get_order(order_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            status = %detail.order.status,
            total = %detail.order.total_amount,
            ship_to = detail.shipping_address.as_deref().unwrap_or("-"),
            "Order delivered"
        );
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Two more mugs than are left: refused, nothing reserved.
    let mug = variations[1];
    match system.storefront.add_to_cart(account, mug, 2).await {
        Ok(item) => info!(item_id = %item.id, "Added to cart"),
        Err(e) => error!(error = %e, "Add to cart failed"),
    }

    // A counter sale that is called off: the tees go back on the shelf.
    let tee = variations[0];
    let span = tracing::info_span!("pos_order");
    async {
        let pos_order = system
            .orders
            .create_order(OrderCreate {
                lines: vec![OrderLineDraft {
                    variation_id: tee,
                    quantity: 3,
                    unit_price: Decimal::new(17_900, 2),
                }],
                ..Default::default()
            })
            .await
            .map_err(|e| e.to_string())?;
        let before = system.inventory.check_stock(tee).await.map_err(|e| e.to_string())?;
        system
            .orders
            .cancel_order(pos_order)
            .await
            .map_err(|e| e.to_string())?;
        let after = system.inventory.check_stock(tee).await.map_err(|e| e.to_string())?;
        info!(%pos_order, before, after, "POS order cancelled");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let stats = system
        .orders
        .statistics(None, None)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        total = stats.total_orders,
        revenue = %stats.total_revenue,
        completed = stats.completed_orders,
        "Statistics"
    );

    system.shutdown().await?;
    info!("Done");
    Ok(())
}
