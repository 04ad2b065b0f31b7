use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use storefront::app_system::{setup_tracing, StoreSystem};
use storefront::config::StoreConfig;
use storefront::domain::{CustomerInfo, OrderStatus, PaymentMethod, PlaceOrder, ProductCreate, ReviewCreate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = StoreConfig::from_env();
    info!(?config, "Starting storefront core");

    let system = StoreSystem::new(config);

    // Seed catalog and blocklist
    let product = system
        .product_client
        .create_product(ProductCreate::new("Handloom Cotton Kurti", Decimal::new(89900, 2), 5))
        .await?;
    system
        .blocklist_client
        .block("744101", Some("Courier does not serve this area".into()))
        .await?;

    let customer = CustomerInfo::new("Priya", "9876501234", "22 Lake View Road", "560034");

    let span = tracing::info_span!("order_processing");
    let placed = async {
        info!("Placing order");
        system
            .order_client
            .place_order(PlaceOrder::new(&product.id, 2, customer.clone(), PaymentMethod::Cod).with_variant("M", "Indigo"))
            .await
    }
    .instrument(span)
    .await?;
    info!(order = %serde_json::to_string(&placed)?, "Order placed");

    let blocked = system
        .order_client
        .place_order(PlaceOrder::new(
            &product.id,
            1,
            CustomerInfo { pincode: "744101".into(), ..customer.clone() },
            PaymentMethod::Upi,
        ))
        .await;
    if let Err(e) = blocked {
        error!(error = %e, "Order rejected (expected)");
    }

    for status in [OrderStatus::Confirmed, OrderStatus::Packed] {
        system.order_client.advance_status(placed.order_id.clone(), status).await?;
    }

    system
        .review_client
        .add_review(ReviewCreate::new(&product.id, "Priya", "9876501234", 5, "Lovely fabric"))
        .await?;

    if let Some(tracked) = system.order_client.track(&customer.phone).await? {
        info!(order_id = %tracked.order_id, status = %tracked.status, "Tracked latest order");
    }
    if let Some(product) = system.product_client.get_product(product.id.clone()).await? {
        info!(stock = product.stock, rating = product.rating, reviews = product.review_count, "Product state");
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
