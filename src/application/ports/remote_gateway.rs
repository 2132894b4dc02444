use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    CachedUser, CatalogHit, CatalogItem, Employee, EmployeeHit, Plant, RecordPayload, RecordRow,
    SessionUser,
};
use crate::domain::value_objects::RecordFilter;
use crate::shared::error::RemoteError;

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Typed operations against the remote authority. Every call either yields
/// a parsed response or a `RemoteError`; partial or garbage data is never
/// returned as a value.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    // Full snapshots, the sync source of truth for the mirrors.
    async fn fetch_employees(&self) -> RemoteResult<Vec<Employee>>;
    async fn fetch_piecework(&self) -> RemoteResult<Vec<CatalogItem>>;
    async fn fetch_plants(&self) -> RemoteResult<Vec<Plant>>;
    async fn fetch_users(&self) -> RemoteResult<Vec<CachedUser>>;

    // Filtered lookups used while online.
    async fn search_employees(&self, query: &str, plant: Option<&str>)
        -> RemoteResult<Vec<EmployeeHit>>;
    async fn search_piecework(&self, query: &str, plant: Option<&str>)
        -> RemoteResult<Vec<CatalogHit>>;

    // Record mutations and queries.
    async fn query_records(&self, filter: &RecordFilter) -> RemoteResult<Vec<RecordRow>>;
    async fn create_record(&self, payload: &RecordPayload) -> RemoteResult<i64>;
    async fn update_record(&self, id: i64, payload: &RecordPayload) -> RemoteResult<()>;
    async fn delete_record(&self, id: i64) -> RemoteResult<()>;

    /// Bulk-submit queued payloads in order; returns the assigned remote
    /// ids in submission order.
    async fn submit_batch(&self, payloads: &[RecordPayload]) -> RemoteResult<Vec<i64>>;

    async fn login(&self, username: &str, password: &str) -> RemoteResult<LoginResponse>;
}
