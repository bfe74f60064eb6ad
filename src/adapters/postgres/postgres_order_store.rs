//! PostgreSQL implementation of OrderStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::order::OrderRecord;
use crate::ports::{OrderStore, OrderStoreError};

#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn submit_order(&self, record: &OrderRecord) -> Result<(), OrderStoreError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, type, quantity, toppings, price, status, username, user_address, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.order_type.as_str())
        .bind(i64::from(record.quantity))
        .bind(&record.toppings)
        .bind(i64::from(record.price))
        .bind(&record.status)
        .bind(&record.username)
        .bind(&record.user_address)
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(order_error)?;

        Ok(())
    }
}

/// Constraint violations reject the order; anything else means the store is
/// not reachable.
fn order_error(e: sqlx::Error) -> OrderStoreError {
    match e {
        sqlx::Error::Database(db) => OrderStoreError::Rejected(db.message().to_string()),
        other => OrderStoreError::Unavailable(other.to_string()),
    }
}
