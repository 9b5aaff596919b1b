use orders_client::{CreateOrderRequest, OrdersClient};
use orders_hex::application::order_service::OrderService;
use orders_hex::inbound::http::{HttpServer, HttpServerConfig};
use orders_repo::memory::InMemoryRepo;
use orders_types::domain::order::OrderChanges;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

// Client against a real server backed by the in-memory adapter.
#[tokio::test]
async fn client_round_trips_through_server() {
    let port = find_free_port();
    let server = HttpServer::new(
        OrderService::new(InMemoryRepo::new()),
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = OrdersClient::new(&format!("http://127.0.0.1:{port}/")).unwrap();
    let created = client
        .create_order(CreateOrderRequest {
            order_name: "A".into(),
            product_code: "P1".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let unchanged = client
        .update_order(created.id, OrderChanges::new())
        .await
        .unwrap();
    assert_eq!(unchanged, Some(created.clone()));

    let renamed = client
        .update_order(created.id, OrderChanges::new().order_name("B"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.order_name, "B");
    assert_eq!(renamed.product_code, "P1");

    assert_eq!(client.list_orders().await.unwrap().len(), 1);
    assert!(client.delete_order(created.id).await.unwrap());
    assert!(!client.delete_order(created.id).await.unwrap());
    assert!(client.get_order(created.id).await.unwrap().is_none());

    handle.abort();
}
