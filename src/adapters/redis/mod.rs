//! Redis adapters.
//!
//! - `RedisPriceCache` - PriceLookup over cached unit prices
//! - `RedisStateStore` - ProfileStore and DialogStateStore as JSON values

mod redis_price_cache;
mod redis_state_store;

pub use redis_price_cache::RedisPriceCache;
pub use redis_state_store::RedisStateStore;

use redis::aio::MultiplexedConnection;

/// Opens a multiplexed connection shared by all Redis adapters.
pub async fn connect(url: &str) -> Result<MultiplexedConnection, redis::RedisError> {
    let client = redis::Client::open(url)?;
    client.get_multiplexed_tokio_connection().await
}
