use crate::errors::AppError;
use orders_types::domain::order::{Order, OrderChanges, OrderId};
use orders_types::ports::order_repository::OrderRepository;

/// Maps repository results onto caller-facing outcomes: absent becomes
/// `NotFound`, store failures become `ServiceUnavailable`.
pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(
        &self,
        order_name: &str,
        product_code: &str,
    ) -> Result<Order, AppError> {
        Ok(self.repo.create(order_name, product_code).await?)
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, AppError> {
        match self.repo.get_by_id(id).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Order, AppError> {
        match self.repo.update(id, changes).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn delete_order(&self, id: OrderId) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("order {}", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use orders_types::ports::order_repository::RepoError;

    struct DownRepo;

    fn down() -> RepoError {
        RepoError::store(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "store down",
        ))
    }

    #[async_trait]
    impl OrderRepository for DownRepo {
        async fn create(&self, _: &str, _: &str) -> Result<Order, RepoError> {
            Err(down())
        }
        async fn get_by_id(&self, _: OrderId) -> Result<Option<Order>, RepoError> {
            Err(down())
        }
        async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
            Err(down())
        }
        async fn update(&self, _: OrderId, _: OrderChanges) -> Result<Option<Order>, RepoError> {
            Err(down())
        }
        async fn delete(&self, _: OrderId) -> Result<bool, RepoError> {
            Err(down())
        }
    }

    #[tokio::test]
    async fn create_and_get_order_in_memory() {
        let repo = orders_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo.clone());
        let order = svc.create_order("Alice", "SKU-1").await.unwrap();
        let got = svc.get_order(order.id).await.unwrap();
        assert_eq!(got.order_name, "Alice");
        assert_eq!(got.product_code, "SKU-1");
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = orders_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo.clone());
        let order = svc.create_order("Bob", "SKU-2").await.unwrap();

        let updated = svc
            .update_order(order.id, OrderChanges::new().order_name("Robert"))
            .await
            .unwrap();
        assert_eq!(updated.order_name, "Robert");
        assert_eq!(updated.product_code, "SKU-2");

        svc.delete_order(order.id).await.unwrap();
        let missing = svc.get_order(order.id).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn not_found_paths() {
        let repo = orders_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo.clone());
        let missing = svc.get_order(99).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let updated = svc.update_order(99, OrderChanges::new()).await;
        assert!(matches!(updated, Err(AppError::NotFound(_))));

        let deleted = svc.delete_order(99).await;
        assert!(matches!(deleted, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_failures_become_service_unavailable() {
        let svc = OrderService::new(DownRepo);
        let res = svc.create_order("A", "P1").await;
        assert!(matches!(res, Err(AppError::ServiceUnavailable(_))));

        let res = svc.get_order(1).await;
        assert!(matches!(res, Err(AppError::ServiceUnavailable(_))));

        let res = svc.list_orders().await;
        assert!(matches!(res, Err(AppError::ServiceUnavailable(_))));

        let res = svc.delete_order(1).await;
        match res {
            Err(AppError::ServiceUnavailable(e)) => {
                assert!(e.store_source::<std::io::Error>().is_some())
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
