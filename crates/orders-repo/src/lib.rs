//! orders-repo: storage adapters for the `OrderRepository` port.
//!
//! Enable `memory` (default) for a process-local store, `sqlite` for sqlx-backed
//! persistence, or both and pick at runtime through [`build_repo`].

#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use orders_types::domain::order::*;
use orders_types::ports::order_repository::OrderRepository;
use orders_types::ports::order_repository::RepoError;

#[cfg(feature = "memory")]
pub mod memory;
pub mod service;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(all(feature = "sqlite", not(feature = "memory")))]
const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db";

#[derive(Clone)]
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self::Memory(crate::memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    // If both features are enabled, a URL selects SQLite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?)),
            None => Ok(Self::Memory(crate::memory::InMemoryRepo::new())),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(_) => "sqlite",
        }
    }

    fn inner(&self) -> &dyn OrderRepository {
        match self {
            #[cfg(feature = "memory")]
            Repo::Memory(repo) => repo,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(repo) => repo,
        }
    }
}

#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order_name: &str, product_code: &str) -> Result<Order, RepoError> {
        self.inner().create(order_name, product_code).await
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        self.inner().get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        self.inner().get_all().await
    }

    async fn update(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, RepoError> {
        self.inner().update(id, changes).await
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepoError> {
        self.inner().delete(id).await
    }
}
