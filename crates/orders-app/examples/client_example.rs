///  To run :
///  cargo r --example client_example
use orders_client::{CreateOrderRequest, OrdersClient};
use orders_hex::application::order_service::OrderService;
use orders_hex::inbound::http::{HttpServer, HttpServerConfig};
use orders_repo::build_repo;
use orders_types::domain::order::OrderChanges;
use tempfile::tempdir;

fn find_free_port() -> anyhow::Result<u16> {
    Ok(std::net::TcpListener::bind("127.0.0.1:0")?
        .local_addr()?
        .port())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port()?;
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("orders.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let service = OrderService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        if let Err(err) = server.run().await {
            eprintln!("server stopped: {err:#}");
        }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = OrdersClient::new(&addr)?;
    let a = client
        .create_order(CreateOrderRequest {
            order_name: "A".into(),
            product_code: "P1".into(),
        })
        .await?;
    let b = client
        .create_order(CreateOrderRequest {
            order_name: "B".into(),
            product_code: "P2".into(),
        })
        .await?;
    println!("Created orders {} and {}", a.id, b.id);
    println!("Listed {} orders", client.list_orders().await?.len());

    if let Some(updated) = client
        .update_order(a.id, OrderChanges::new().product_code("P9"))
        .await?
    {
        println!(
            "Updated order {}: name={} code={}",
            updated.id, updated.order_name, updated.product_code
        );
    }

    println!("Delete {} -> {}", b.id, client.delete_order(b.id).await?);
    println!("Delete {} again -> {}", b.id, client.delete_order(b.id).await?);
    println!("Remaining: {:?}", client.list_orders().await?);

    handle.abort();
    Ok(())
}
