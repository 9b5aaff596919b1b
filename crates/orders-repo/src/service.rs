//! Free functions over a database session.
//!
//! Each call binds a fresh repository to the session and delegates to it, so
//! callers never have to construct a repository themselves.

use orders_types::domain::order::{Order, OrderChanges, OrderId};
use orders_types::ports::order_repository::{OrderRepository, RepoError};

/// A handle the repository can be bound to for the duration of one call.
pub trait OrderSession {
    type Repository: OrderRepository;

    fn order_repository(&self) -> Self::Repository;
}

#[cfg(feature = "sqlite")]
impl OrderSession for sqlx::SqlitePool {
    type Repository = crate::sqlite::SqliteRepo;

    fn order_repository(&self) -> Self::Repository {
        crate::sqlite::SqliteRepo::from_pool(self.clone())
    }
}

#[cfg(feature = "memory")]
impl OrderSession for crate::memory::InMemoryRepo {
    type Repository = crate::memory::InMemoryRepo;

    fn order_repository(&self) -> Self::Repository {
        self.clone()
    }
}

impl OrderSession for crate::Repo {
    type Repository = crate::Repo;

    fn order_repository(&self) -> Self::Repository {
        self.clone()
    }
}

pub async fn create_order<S: OrderSession>(
    db: &S,
    order_name: &str,
    product_code: &str,
) -> Result<Order, RepoError> {
    db.order_repository().create(order_name, product_code).await
}

pub async fn get_order<S: OrderSession>(
    db: &S,
    order_id: OrderId,
) -> Result<Option<Order>, RepoError> {
    db.order_repository().get_by_id(order_id).await
}

pub async fn get_all_orders<S: OrderSession>(db: &S) -> Result<Vec<Order>, RepoError> {
    db.order_repository().get_all().await
}

pub async fn update_order<S: OrderSession>(
    db: &S,
    order_id: OrderId,
    changes: OrderChanges,
) -> Result<Option<Order>, RepoError> {
    db.order_repository().update(order_id, changes).await
}

pub async fn delete_order<S: OrderSession>(
    db: &S,
    order_id: OrderId,
) -> Result<bool, RepoError> {
    db.order_repository().delete(order_id).await
}
