use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

/// JSON values in Redis, keyed by the helpers in [`keys`].
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        value
            .map(|v| {
                serde_json::from_str(&v).map_err(|e| {
                    RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })
            })
            .transpose()
    }

    /// Store `value` for `ttl`.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut self.connection.clone())
            .await
    }

    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Best-effort delete; a failure only leaves a stale entry until its TTL runs out.
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            tracing::warn!(%key, error = %e, "Cache invalidation failed");
        }
    }
}

pub mod keys {
    use uuid::Uuid;

    pub fn user(id: Uuid) -> String {
        format!("user:{id}")
    }

    pub fn artist(id: Uuid) -> String {
        format!("artist:{id}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub user_ttl: Duration,
    pub artist_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            user_ttl: Duration::from_secs(900),   // 15 minutes
            artist_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_ttl: parse_duration_secs("CACHE_TTL_USERS", defaults.user_ttl),
            artist_ttl: parse_duration_secs("CACHE_TTL_ARTISTS", defaults.artist_ttl),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: Duration) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

pub type CacheData = Arc<RedisCache>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn keys_are_namespaced() {
        let id = Uuid::nil();
        assert_eq!(
            keys::user(id),
            "user:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            keys::artist(id),
            "artist:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn unparsable_ttl_falls_back_to_default() {
        let default = Duration::from_secs(42);
        assert_eq!(
            parse_duration_secs("ARTLINK_TEST_TTL_THAT_IS_NEVER_SET", default),
            default
        );
    }
}
