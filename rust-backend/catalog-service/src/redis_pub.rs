use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use serde::Serialize;

pub const PRODUCT_VIEWED: &str = "product.viewed";
pub const BRAND_VIEWED: &str = "brand.viewed";
pub const CONTACT_SUBMITTED: &str = "contact.submitted";

/// Publishes catalog events on Redis pub/sub. Without a connection every
/// publish is a no-op.
#[derive(Clone)]
pub struct RedisPublisher {
    conn: Option<MultiplexedConnection>,
}

impl RedisPublisher {
    pub async fn new(url: &str) -> Result<Self, RedisError> {
        let client = Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn: Some(conn) })
    }

    pub fn new_noop() -> Self {
        Self { conn: None }
    }

    pub fn is_noop(&self) -> bool {
        self.conn.is_none()
    }

    pub async fn publish<T: Serialize>(&self, channel: &str, event: &T) -> Result<(), RedisError> {
        let Some(conn) = &self.conn else {
            return Ok(());
        };

        let payload = serde_json::to_string(event).map_err(|e| {
            RedisError::from((redis::ErrorKind::TypeError, "event serialisation failed", e.to_string()))
        })?;
        // multiplexed connections are cheap to clone and share one socket
        let mut conn = conn.clone();
        conn.publish::<_, _, ()>(channel, payload).await
    }
}
