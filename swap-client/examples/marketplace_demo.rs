// swap-client/examples/marketplace_demo.rs
// Log in, browse the catalog, and place an order against a running server.

use swap_client::{ClientEvent, SwapClient};

use shared::models::{CreateOrderRequest, ProductQuery, TransactionType};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <account> <password>", args[0]);
        println!("  Example: {} wei password123", args[0]);
        return Ok(());
    }

    let account = &args[1];
    let password = &args[2];

    let base_url =
        std::env::var("SWAP_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let data_dir = std::env::var("SWAP_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    let client = SwapClient::builder()
        .base_url(&base_url)
        .data_dir(&data_dir)
        .build()?;

    // surface gateway notices the way a UI would
    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ClientEvent::Notice { level, message } => {
                    tracing::info!(?level, "{message}");
                }
                ClientEvent::SessionExpired => {
                    tracing::warn!("session expired, please log in again");
                }
            }
        }
    });

    if !client.session().is_authenticated() {
        let login = client.auth().login(account, password).await?;
        tracing::info!("Logged in as: {}", login.user.username);
    } else {
        tracing::info!("Reusing cached session");
    }

    let page = client
        .catalog()
        .list(&ProductQuery {
            page_num: Some(1),
            page_size: Some(5),
            ..Default::default()
        })
        .await?;
    tracing::info!("Catalog has {} listed products", page.total);

    if let Some(product) = page.list.first() {
        tracing::info!("Ordering \"{}\" ({})", product.title, product.price);
        let order = client
            .orders()
            .create(&CreateOrderRequest::new(product.id, TransactionType::Meet))
            .await?;
        tracing::info!("Order placed: {}", order.order_no);
    }

    Ok(())
}
