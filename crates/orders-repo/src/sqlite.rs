use async_trait::async_trait;
use orders_types::domain::order::{Order, OrderChanges, OrderId};
use orders_types::ports::order_repository::{OrderRepository, RepoError};
use sqlx::sqlite::{Sqlite, SqliteConnectOptions};
use sqlx::{FromRow, SqlitePool, Transaction};
use std::str::FromStr;

const SELECT_BY_ID: &str = "SELECT id, order_name, product_code FROM orders WHERE id = ?";

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    order_name: String,
    product_code: String,
}

impl From<DbOrder> for Order {
    fn from(row: DbOrder) -> Self {
        Order {
            id: row.id,
            order_name: row.order_name,
            product_code: row.product_code,
        }
    }
}

/// Opens a pool for `database_url` and applies the orders migration.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    // Ensure on-disk SQLite target directory exists (no-op for in-memory).
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        if path != ":memory:" {
            let p = std::path::Path::new(path);
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    let ddl = include_str!("../migrations/0001_create_orders.sql");
    sqlx::query(ddl).execute(&pool).await?;

    Ok(pool)
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Ok(Self::from_pool(connect(database_url).await?))
    }

    /// Binds a repository to an already migrated pool. Cheap: the pool is shared.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, RepoError> {
        self.pool.begin().await.map_err(RepoError::store)
    }
}

/// Commits on success. On failure rolls back and hands the original error back.
async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, sqlx::Error>,
) -> Result<T, RepoError> {
    match result {
        Ok(value) => {
            // a failed commit drops `tx`, which rolls it back
            tx.commit().await.map_err(RepoError::store)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            tracing::debug!(error = %err, "transaction rolled back");
            Err(RepoError::store(err))
        }
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create(&self, order_name: &str, product_code: &str) -> Result<Order, RepoError> {
        let mut tx = self.begin().await?;
        let inserted = sqlx::query_as::<_, DbOrder>(
            "INSERT INTO orders (order_name, product_code) VALUES (?, ?)
             RETURNING id, order_name, product_code",
        )
        .bind(order_name)
        .bind(product_code)
        .fetch_one(&mut *tx)
        .await;
        let order: Order = finish(tx, inserted).await?.into();
        tracing::debug!(order_id = order.id, "order created");
        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::store)?;
        Ok(row.map(Order::from))
    }

    async fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> =
            sqlx::query_as("SELECT id, order_name, product_code FROM orders ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(RepoError::store)?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn update(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, RepoError> {
        if self.get_by_id(id).await?.is_none() {
            return Ok(None);
        }
        let order_name = changes.order_name.into_option();
        let product_code = changes.product_code.into_option();

        let mut tx = self.begin().await?;
        // unset fields bind NULL and keep the stored value
        let refreshed: Result<Option<DbOrder>, sqlx::Error> = async {
            sqlx::query(
                "UPDATE orders
                 SET order_name = COALESCE(?, order_name),
                     product_code = COALESCE(?, product_code)
                 WHERE id = ?",
            )
            .bind(order_name)
            .bind(product_code)
            .bind(id)
            .execute(&mut *tx)
            .await?;
            sqlx::query_as::<_, DbOrder>(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
        }
        .await;
        let refreshed = finish(tx, refreshed).await?;
        tracing::debug!(order_id = id, "order updated");
        Ok(refreshed.map(Order::from))
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepoError> {
        if self.get_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let mut tx = self.begin().await?;
        let res = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await;
        let res = finish(tx, res).await?;
        tracing::debug!(order_id = id, "order deleted");
        Ok(res.rows_affected() > 0)
    }
}
