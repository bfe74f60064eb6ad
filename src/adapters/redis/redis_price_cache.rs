//! Redis-backed price lookup.
//!
//! Unit prices are plain string values under `{prefix}{item}`, e.g. `pizza`
//! and `topping` with the default empty prefix. Nothing here writes or
//! expires them; they are maintained outside the bot.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{PriceLookup, PriceLookupError};

#[derive(Clone)]
pub struct RedisPriceCache {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisPriceCache {
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, item: &str) -> String {
        price_key(&self.key_prefix, item)
    }
}

fn price_key(prefix: &str, item: &str) -> String {
    format!("{}{}", prefix, item)
}

/// Parses a cached price. Values are whole currency units.
fn parse_price(item: &str, raw: Option<String>) -> Result<u32, PriceLookupError> {
    let raw = raw.ok_or_else(|| PriceLookupError::Missing(item.to_string()))?;
    raw.trim().parse::<u32>().map_err(|_| PriceLookupError::Invalid {
        item: item.to_string(),
        value: raw.clone(),
    })
}

#[async_trait]
impl PriceLookup for RedisPriceCache {
    async fn lookup_price(&self, item: &str) -> Result<u32, PriceLookupError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(self.key_for(item))
            .await
            .map_err(|e: redis::RedisError| PriceLookupError::Unavailable(e.to_string()))?;
        parse_price(item, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_prefix() {
        assert_eq!(price_key("", "pizza"), "pizza");
        assert_eq!(price_key("prices:", "topping"), "prices:topping");
    }

    #[test]
    fn parses_whole_prices() {
        assert_eq!(parse_price("pizza", Some("50".to_string())), Ok(50));
        assert_eq!(parse_price("pizza", Some(" 5 ".to_string())), Ok(5));
    }

    #[test]
    fn missing_key_is_missing() {
        assert_eq!(
            parse_price("topping", None),
            Err(PriceLookupError::Missing("topping".to_string()))
        );
    }

    #[test]
    fn non_numeric_value_is_invalid() {
        assert!(matches!(
            parse_price("pizza", Some("cheap".to_string())),
            Err(PriceLookupError::Invalid { .. })
        ));
        assert!(matches!(
            parse_price("pizza", Some("-3".to_string())),
            Err(PriceLookupError::Invalid { .. })
        ));
    }
}
