use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::logger::Logger;

/// Marks rendered pages as stale. Failures are never reported back.
#[async_trait]
pub trait PageCache: Send + Sync {
    async fn invalidate(&self, path: &str);
}

/// Deletes the cached render stored under `page:<path>`.
#[derive(Clone)]
pub struct RedisPageCache {
    client: redis::Client,
}

impl RedisPageCache {
    pub fn new(client: redis::Client) -> Self {
        RedisPageCache { client }
    }

    pub fn key(path: &str) -> String {
        format!("page:{}", path)
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn invalidate(&self, path: &str) {
        let mut conn = match self.client.get_async_connection().await {
            Ok(conn) => conn,
            Err(err) => {
                Logger::new(format!("invalidate {}: {:?}", path, err)).log();
                return;
            }
        };

        let deleted: redis::RedisResult<i64> = redis::cmd("DEL")
            .arg(Self::key(path))
            .query_async(&mut conn)
            .await;

        match deleted {
            Ok(count) => tracing::debug!(path, count, "page cache invalidated"),
            Err(err) => Logger::new(format!("invalidate {}: {:?}", path, err)).log(),
        }
    }
}

/// Records invalidated paths in process memory.
#[derive(Clone, Default)]
pub struct MemoryPageCache {
    invalidated: Arc<Mutex<Vec<String>>>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidated(&self) -> Vec<String> {
        match self.invalidated.lock() {
            Ok(paths) => paths.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    async fn invalidate(&self, path: &str) {
        match self.invalidated.lock() {
            Ok(mut paths) => paths.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }

        tracing::debug!(path, "page cache invalidated");
    }
}
