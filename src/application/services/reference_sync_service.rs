use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::ports::{Collection, LocalStore, RemoteGateway, StoreKey};
use crate::domain::entities::{
    CachedUser, CatalogItem, Employee, Plant, ReferenceRow, PLANT_WILDCARD,
};
use crate::domain::value_objects::CatalogId;
use crate::shared::error::{RemoteError, Result};

/// Result of reconciling one local mirror against the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Snapshot applied: upserts plus tombstone removals.
    Applied { upserted: usize, removed: usize },
    /// The authority declared the table empty; the mirror was cleared.
    Cleared,
    /// Fetch failed; the mirror keeps its last-known-good state.
    SkippedFetchFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub employees: ReconcileOutcome,
    pub piecework: ReconcileOutcome,
    pub plants: ReconcileOutcome,
}

/// Reconciles the local reference mirrors (employees, piecework catalog,
/// plants, cached users) against the authority's full snapshots.
///
/// Authority wins whenever it answers; local state wins when the fetch
/// fails, because staleness is preferable to data loss while offline.
pub struct ReferenceSyncService {
    store: Arc<dyn LocalStore>,
    gateway: Arc<dyn RemoteGateway>,
}

impl ReferenceSyncService {
    pub fn new(store: Arc<dyn LocalStore>, gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn sync_employees(&self) -> Result<ReconcileOutcome> {
        let fetched = self.gateway.fetch_employees().await;
        self.reconcile(Collection::Employees, fetched).await
    }

    pub async fn sync_piecework(&self) -> Result<ReconcileOutcome> {
        let fetched = self.gateway.fetch_piecework().await;
        self.reconcile(Collection::Piecework, fetched).await
    }

    pub async fn sync_plants(&self) -> Result<ReconcileOutcome> {
        let fetched = self.gateway.fetch_plants().await;
        self.reconcile(Collection::Plants, fetched).await
    }

    pub async fn sync_users(&self) -> Result<ReconcileOutcome> {
        let fetched = self.gateway.fetch_users().await;
        self.reconcile(Collection::Users, fetched).await
    }

    /// Refresh the three reference tables. A failed fetch skips that
    /// collection only; the others still run.
    pub async fn sync_all(&self) -> Result<SyncReport> {
        let report = SyncReport {
            employees: self.sync_employees().await?,
            piecework: self.sync_piecework().await?,
            plants: self.sync_plants().await?,
        };
        info!(?report, "reference sync finished");
        Ok(report)
    }

    /// One reconciliation algorithm for every mirror:
    /// fetch failure → keep local state; explicit empty snapshot → clear;
    /// otherwise upsert by natural key and delete keys the authority no
    /// longer reports.
    async fn reconcile<T: ReferenceRow>(
        &self,
        collection: Collection,
        fetched: std::result::Result<Vec<T>, RemoteError>,
    ) -> Result<ReconcileOutcome> {
        let rows = match fetched {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%collection, %err, "reference fetch failed, keeping local mirror");
                return Ok(ReconcileOutcome::SkippedFetchFailed {
                    message: err.message,
                });
            }
        };

        if rows.is_empty() {
            debug!(%collection, "authority reports empty table, clearing mirror");
            self.store.clear(collection).await?;
            return Ok(ReconcileOutcome::Cleared);
        }

        let mut to_delete: HashSet<String> = self
            .store
            .get_all(collection)
            .await?
            .into_iter()
            .filter_map(|entry| match entry.key {
                StoreKey::Natural(key) => Some(key),
                StoreKey::Seq(_) => None,
            })
            .collect();

        let upserted = rows.len();
        for row in rows {
            let key = row.natural_key();
            let value = serde_json::to_value(&row)?;
            self.store
                .put(collection, &StoreKey::Natural(key.clone()), value)
                .await?;
            to_delete.remove(&key);
        }

        let removed = to_delete.len();
        for key in to_delete {
            self.store.delete(collection, &StoreKey::natural(key)).await?;
        }

        debug!(%collection, upserted, removed, "mirror reconciled");
        Ok(ReconcileOutcome::Applied { upserted, removed })
    }

    async fn read_mirror<T: ReferenceRow>(&self, collection: Collection) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        for entry in self.store.get_all(collection).await? {
            rows.push(serde_json::from_value(entry.value)?);
        }
        Ok(rows)
    }

    /// Offline employee lookup over the mirror, with the same plant and
    /// query semantics as the online search endpoint.
    pub async fn local_employees(
        &self,
        query: &str,
        plant: Option<&str>,
    ) -> Result<Vec<Employee>> {
        let rows: Vec<Employee> = self.read_mirror(Collection::Employees).await?;
        let query = query.trim().to_lowercase();
        Ok(rows
            .into_iter()
            .filter(|e| match plant.map(str::trim).filter(|p| !p.is_empty()) {
                None => true,
                Some(plant) => match e.plant_group.as_deref() {
                    Some(group) => group == plant || plant == PLANT_WILDCARD,
                    None => false,
                },
            })
            .filter(|e| query.is_empty() || e.full_name.to_lowercase().contains(&query))
            .collect())
    }

    /// Offline catalog lookup over the mirror. A row tagged with the
    /// wildcard plant is visible from every plant.
    pub async fn local_piecework(
        &self,
        query: &str,
        plant: Option<&str>,
    ) -> Result<Vec<CatalogItem>> {
        let rows: Vec<CatalogItem> = self.read_mirror(Collection::Piecework).await?;
        let query = query.trim().to_lowercase();
        Ok(rows
            .into_iter()
            .filter(|d| match plant.map(str::trim).filter(|p| !p.is_empty()) {
                None => true,
                Some(plant) => {
                    let row_plant = d.plant.as_deref().unwrap_or("").trim();
                    row_plant == plant || row_plant == PLANT_WILDCARD || plant == PLANT_WILDCARD
                }
            })
            .filter(|d| query.is_empty() || d.concept.to_lowercase().contains(&query))
            .collect())
    }

    pub async fn local_plants(&self) -> Result<Vec<Plant>> {
        self.read_mirror(Collection::Plants).await
    }

    /// Resolve a catalog id against the mirror.
    pub async fn catalog_item(&self, id: CatalogId) -> Result<Option<CatalogItem>> {
        let entry = self
            .store
            .get_all(Collection::Piecework)
            .await?
            .into_iter()
            .find(|entry| entry.key == StoreKey::Natural(id.to_string()));
        match entry {
            Some(entry) => Ok(Some(serde_json::from_value(entry.value)?)),
            None => Ok(None),
        }
    }

    pub async fn has_catalog_entries(&self) -> Result<bool> {
        Ok(!self.store.get_all(Collection::Piecework).await?.is_empty())
    }

    /// Look up a cached user by login name (offline credential cache).
    pub async fn find_user(&self, name: &str) -> Result<Option<CachedUser>> {
        for entry in self.store.get_all(Collection::Users).await? {
            let user: CachedUser = serde_json::from_value(entry.value)?;
            if user.name == name {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    /// Raw mirror snapshot, used to compare state across sync runs.
    pub async fn mirror_snapshot(&self, collection: Collection) -> Result<Vec<(StoreKey, Value)>> {
        Ok(self
            .store
            .get_all(collection)
            .await?
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect())
    }
}
