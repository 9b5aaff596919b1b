use axum::{
    extract::State,
    routing::{get, post},
    serve, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::errors::AppError;
use orders_types::domain::order::{Order, OrderChanges, OrderId};
use orders_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

#[derive(Clone)]
pub struct HttpServer<R>
where
    R: OrderRepository,
{
    pub service: Arc<OrderService<R>>,
    pub config: HttpServerConfig,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub order_name: String,
    pub product_code: String,
}

/// Omitted (or null) fields keep their stored value.
#[derive(Deserialize)]
pub struct UpdateOrderRequest {
    pub order_name: Option<String>,
    pub product_code: Option<String>,
}

impl From<UpdateOrderRequest> for OrderChanges {
    fn from(req: UpdateOrderRequest) -> Self {
        OrderChanges {
            order_name: req.order_name.into(),
            product_code: req.product_code.into(),
        }
    }
}

fn parse_id(raw: &str) -> Result<OrderId, AppError> {
    raw.parse::<OrderId>()
        .map_err(|e| AppError::BadRequest(format!("invalid order id {raw:?}: {e}")))
}

impl<R> HttpServer<R>
where
    R: OrderRepository,
{
    pub async fn new(service: OrderService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/health", get(health))
            .route("/orders", post(create_order::<R>).get(list_orders::<R>))
            .route(
                "/orders/{id}",
                get(get_order::<R>)
                    .patch(update_order::<R>)
                    .delete(delete_order::<R>),
            )
            .layer(trace_layer)
            .with_state(self.service.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(axum::http::StatusCode, Json<Order>), AppError> {
    let order = service
        .create_order(&payload.order_name, &payload.product_code)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(order)))
}

async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = service.get_order(parse_id(&id)?).await?;
    Ok(Json(order))
}

async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> Result<Json<Vec<Order>>, AppError> {
    let list = service.list_orders().await?;
    Ok(Json(list))
}

async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let updated = service
        .update_order(parse_id(&id)?, payload.into())
        .await?;
    Ok(Json(updated))
}

async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<axum::http::StatusCode, AppError> {
    service.delete_order(parse_id(&id)?).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orders_types::domain::order::FieldUpdate;

    #[test]
    fn update_request_maps_missing_fields_to_unset() {
        let req: UpdateOrderRequest =
            serde_json::from_str(r#"{"product_code":"P9"}"#).unwrap();
        let changes: OrderChanges = req.into();
        assert_eq!(changes.order_name, FieldUpdate::Unset);
        assert_eq!(changes.product_code, FieldUpdate::Set("P9".to_string()));

        let empty: OrderChanges = serde_json::from_str::<UpdateOrderRequest>("{}")
            .unwrap()
            .into();
        assert!(empty.is_empty());
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }
}
