use async_trait::async_trait;

use crate::domain::order::{Order, OrderChanges, OrderId};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    /// The backing store failed. The backend's own error is kept as the source.
    #[error("store error: {0}")]
    Store(#[source] BoxError),
}

impl RepoError {
    pub fn store(err: impl Into<BoxError>) -> Self {
        RepoError::Store(err.into())
    }

    /// Borrows the backend error if it has type `E`.
    pub fn store_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            RepoError::Store(err) => err.downcast_ref::<E>(),
        }
    }
}

/// CRUD contract for the Order entity.
///
/// Not-found is never an error: lookups return `None`, `delete` returns
/// `false`. `update` writes only the fields set in `OrderChanges`.
///
/// Store-backed adapters run each mutation in its own transaction and roll
/// it back before returning `RepoError::Store`. The in-memory adapter has no
/// transactions and never fails.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order_name: &str, product_code: &str) -> Result<Order, RepoError>;
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepoError>;
    async fn get_all(&self) -> Result<Vec<Order>, RepoError>;
    async fn update(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, RepoError>;
    async fn delete(&self, id: OrderId) -> Result<bool, RepoError>;
}
