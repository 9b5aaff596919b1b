use async_trait::async_trait;
use dashmap::DashMap;
use orders_types::domain::order::{Order, OrderChanges, OrderId};
use orders_types::ports::order_repository::{OrderRepository, RepoError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Process-local store. Clones share the same map and id sequence.
#[derive(Clone)]
pub struct InMemoryRepo {
    pub map: Arc<DashMap<OrderId, Order>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, order_name: &str, product_code: &str) -> Result<Order, RepoError> {
        // ids are never handed out twice, even after delete
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = Order {
            id,
            order_name: order_name.to_owned(),
            product_code: product_code.to_owned(),
        };
        self.map.insert(id, order.clone());
        tracing::debug!(order_id = id, "order created");
        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        Ok(self.map.get(&id).map(|r| r.clone()))
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        let mut orders: Vec<Order> = self.map.iter().map(|kv| kv.value().clone()).collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    async fn update(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.map.get_mut(&id) {
            v.apply(changes);
            tracing::debug!(order_id = id, "order updated");
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepoError> {
        let removed = self.map.remove(&id).is_some();
        if removed {
            tracing::debug!(order_id = id, "order deleted");
        }
        Ok(removed)
    }
}
