//! PostgreSQL adapters.
//!
//! - `PostgresOrderStore` - OrderStore writing to `orders`
//! - `PostgresConversationLog` - ConversationLog over `conversations`

mod postgres_conversation_log;
mod postgres_order_store;

pub use postgres_conversation_log::PostgresConversationLog;
pub use postgres_order_store::PostgresOrderStore;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

use crate::config::DatabaseConfig;

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(config.url())
        .await
}

/// Applies the SQL migrations in `dir` that have not run yet.
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    info!(dir = %dir.display(), "Running database migrations");
    Migrator::new(dir).await?.run(pool).await
}
