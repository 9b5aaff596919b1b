use std::time::Duration;

use anyhow::Context;
use orders_types::domain::order::{Order, OrderChanges, OrderId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct OrdersClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// HTTP client for the orders API. A 404 comes back as `None` / `false`,
/// the same way the repository reports a missing order.
#[derive(Clone)]
pub struct OrdersClient {
    base: Url,
    client: reqwest::Client,
}

impl OrdersClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<OrdersClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(OrdersClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn create_order(&self, req: CreateOrderRequest) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("orders")?)
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: OrderId) -> anyhow::Result<Option<Order>> {
        let res = self
            .client
            .get(self.url(&format!("orders/{id}"))?)
            .send()
            .await?;
        optional_json(res).await
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .client
            .get(self.url("orders")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> anyhow::Result<Option<Order>> {
        let res = self
            .client
            .patch(self.url(&format!("orders/{id}"))?)
            .json(&UpdateOrderRequest::from(changes))
            .send()
            .await?;
        optional_json(res).await
    }

    pub async fn delete_order(&self, id: OrderId) -> anyhow::Result<bool> {
        let res = self
            .client
            .delete(self.url(&format!("orders/{id}"))?)
            .send()
            .await?;
        if res.status() == StatusCode::NOT_FOUND {
            tracing::debug!(order_id = id, "delete: order not found");
            return Ok(false);
        }
        res.error_for_status()?;
        Ok(true)
    }
}

async fn optional_json<T: DeserializeOwned>(res: reqwest::Response) -> anyhow::Result<Option<T>> {
    if res.status() == StatusCode::NOT_FOUND {
        tracing::debug!(url = %res.url(), "order not found");
        return Ok(None);
    }
    Ok(Some(res.error_for_status()?.json().await?))
}

impl OrdersClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<OrdersClient> {
        if let Some(client) = self.client {
            return Ok(OrdersClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(OrdersClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrderRequest {
    pub order_name: String,
    pub product_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct UpdateOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    order_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_code: Option<String>,
}

impl From<OrderChanges> for UpdateOrderRequest {
    fn from(changes: OrderChanges) -> Self {
        Self {
            order_name: changes.order_name.into_option(),
            product_code: changes.product_code.into_option(),
        }
    }
}
