use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::sync::Arc;
use log::info;

use crate::config::{Settings, StorageBackend};
use crate::models::employee::Employee;

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryEmployeeStore;
pub use postgres::PostgresEmployeeStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(i64),
    UniqueViolation(String),
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "No employee row with id {}", id),
            StoreError::UniqueViolation(msg) => write!(f, "Unique constraint violated: {}", msg),
            StoreError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation(db_err.message().to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Entry point of the persistence port. Each logical operation runs inside one
/// transaction obtained from [`EmployeeStore::begin`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn EmployeeTransaction>, StoreError>;
}

/// Store calls scoped to a single transaction. Dropping it without
/// [`commit`](EmployeeTransaction::commit) discards every write.
#[async_trait]
pub trait EmployeeTransaction: Send {
    /// Inserts when `id` is `None`, otherwise fully replaces the row at `id`,
    /// failing with [`StoreError::NotFound`] if that row does not exist.
    async fn save(&mut self, employee: Employee) -> Result<Employee, StoreError>;

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Employee>, StoreError>;

    async fn find_all(&mut self) -> Result<Vec<Employee>, StoreError>;

    /// No-op when the id is absent.
    async fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn connect(settings: &Settings) -> Result<Arc<dyn EmployeeStore>, StoreError> {
    match &settings.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url, settings.max_connections).await?;
            if settings.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|err| StoreError::Database(err.to_string()))?;
                info!("Database migrations applied");
            }
            Ok(Arc::new(PostgresEmployeeStore::new(pool)))
        }
        StorageBackend::Memory => {
            info!("Using in-memory employee store");
            Ok(Arc::new(MemoryEmployeeStore::new()))
        }
    }
}
