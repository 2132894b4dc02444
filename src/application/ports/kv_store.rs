use async_trait::async_trait;
use serde_json::Value;

use crate::shared::error::Result;

/// The simpler key-value store used for the session record.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn put(&self, key: &str, value: Value) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}
