use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::domain::value_objects::LocalKey;
use crate::shared::error::Result;

/// Named local collections. `Queue` is keyed by an auto-incrementing local
/// key whose insertion order is significant; the mirrors are keyed by their
/// natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Queue,
    Employees,
    Piecework,
    Plants,
    Users,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Queue => "queue",
            Collection::Employees => "employees",
            Collection::Piecework => "piecework",
            Collection::Plants => "plants",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key of a stored entry: the store-assigned sequence key for queue rows,
/// or the domain natural key for mirror rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Seq(LocalKey),
    Natural(String),
}

impl StoreKey {
    pub fn natural(key: impl Into<String>) -> Self {
        StoreKey::Natural(key.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub key: StoreKey,
    pub value: Value,
}

/// Uniform transactional access to the named local collections. Every call
/// either fully applies or has no effect; a failed call surfaces a storage
/// error and is not retried here.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Insert with a store-assigned auto-incrementing key.
    async fn add(&self, collection: Collection, value: Value) -> Result<LocalKey>;

    /// Idempotent upsert by key.
    async fn put(&self, collection: Collection, key: &StoreKey, value: Value) -> Result<()>;

    /// All entries of a collection in ascending insertion order.
    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredEntry>>;

    async fn delete(&self, collection: Collection, key: &StoreKey) -> Result<()>;

    async fn clear(&self, collection: Collection) -> Result<()>;
}
