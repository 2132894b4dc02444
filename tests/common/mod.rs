#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use destajos_core::domain::entities::{
    CachedUser, CatalogHit, CatalogItem, Employee, EmployeeHit, Plant, RecordDraft, RecordPayload,
    RecordRow,
};
use destajos_core::infrastructure::remote::SharedConnectivityFlag;
use destajos_core::infrastructure::storage::{init_schema, SqliteKeyValueStore, SqliteLocalStore};
use destajos_core::{
    Collection, ConnectivityProbe, FlushService, KeyValueStore, LocalStore, LoginResponse,
    RecordFilter, RecordService, ReferenceSyncService, RemoteError, RemoteGateway, RemoteResult,
    SessionService, StoreKey,
};

pub async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}

pub fn unscripted<T>() -> RemoteResult<T> {
    Err(RemoteError::transport("no scripted response"))
}

/// Scripted stand-in for the remote authority. Snapshot endpoints hold a
/// single result; mutation endpoints pop from a script queue and fail as
/// unreachable when the script runs out.
pub struct FakeGateway {
    pub employees: Mutex<RemoteResult<Vec<Employee>>>,
    pub piecework: Mutex<RemoteResult<Vec<CatalogItem>>>,
    pub plants: Mutex<RemoteResult<Vec<Plant>>>,
    pub users: Mutex<RemoteResult<Vec<CachedUser>>>,
    pub employee_hits: Mutex<RemoteResult<Vec<EmployeeHit>>>,
    pub catalog_hits: Mutex<RemoteResult<Vec<CatalogHit>>>,
    pub records: Mutex<RemoteResult<Vec<RecordRow>>>,
    pub create_results: Mutex<VecDeque<RemoteResult<i64>>>,
    pub update_results: Mutex<VecDeque<RemoteResult<()>>>,
    pub delete_results: Mutex<VecDeque<RemoteResult<()>>>,
    pub batch_results: Mutex<VecDeque<RemoteResult<Vec<i64>>>>,
    pub login_results: Mutex<VecDeque<RemoteResult<LoginResponse>>>,
    pub created: Mutex<Vec<RecordPayload>>,
    pub updated: Mutex<Vec<(i64, RecordPayload)>>,
    pub deleted: Mutex<Vec<i64>>,
    pub submitted_batches: Mutex<Vec<Vec<RecordPayload>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            employees: Mutex::new(Ok(Vec::new())),
            piecework: Mutex::new(Ok(Vec::new())),
            plants: Mutex::new(Ok(Vec::new())),
            users: Mutex::new(Ok(Vec::new())),
            employee_hits: Mutex::new(Ok(Vec::new())),
            catalog_hits: Mutex::new(Ok(Vec::new())),
            records: Mutex::new(Ok(Vec::new())),
            create_results: Mutex::new(VecDeque::new()),
            update_results: Mutex::new(VecDeque::new()),
            delete_results: Mutex::new(VecDeque::new()),
            batch_results: Mutex::new(VecDeque::new()),
            login_results: Mutex::new(VecDeque::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            submitted_batches: Mutex::new(Vec::new()),
        }
    }

    pub fn script_create(&self, result: RemoteResult<i64>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn script_update(&self, result: RemoteResult<()>) {
        self.update_results.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: RemoteResult<()>) {
        self.delete_results.lock().unwrap().push_back(result);
    }

    pub fn script_batch(&self, result: RemoteResult<Vec<i64>>) {
        self.batch_results.lock().unwrap().push_back(result);
    }

    pub fn script_login(&self, result: RemoteResult<LoginResponse>) {
        self.login_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn fetch_employees(&self) -> RemoteResult<Vec<Employee>> {
        self.employees.lock().unwrap().clone()
    }

    async fn fetch_piecework(&self) -> RemoteResult<Vec<CatalogItem>> {
        self.piecework.lock().unwrap().clone()
    }

    async fn fetch_plants(&self) -> RemoteResult<Vec<Plant>> {
        self.plants.lock().unwrap().clone()
    }

    async fn fetch_users(&self) -> RemoteResult<Vec<CachedUser>> {
        self.users.lock().unwrap().clone()
    }

    async fn search_employees(&self, _query: &str, _plant: Option<&str>) -> RemoteResult<Vec<EmployeeHit>> {
        self.employee_hits.lock().unwrap().clone()
    }

    async fn search_piecework(&self, _query: &str, _plant: Option<&str>) -> RemoteResult<Vec<CatalogHit>> {
        self.catalog_hits.lock().unwrap().clone()
    }

    async fn query_records(&self, _filter: &RecordFilter) -> RemoteResult<Vec<RecordRow>> {
        self.records.lock().unwrap().clone()
    }

    async fn create_record(&self, payload: &RecordPayload) -> RemoteResult<i64> {
        let result = self
            .create_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted);
        if result.is_ok() {
            self.created.lock().unwrap().push(payload.clone());
        }
        result
    }

    async fn update_record(&self, id: i64, payload: &RecordPayload) -> RemoteResult<()> {
        let result = self
            .update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted);
        if result.is_ok() {
            self.updated.lock().unwrap().push((id, payload.clone()));
        }
        result
    }

    async fn delete_record(&self, id: i64) -> RemoteResult<()> {
        let result = self
            .delete_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted);
        if result.is_ok() {
            self.deleted.lock().unwrap().push(id);
        }
        result
    }

    async fn submit_batch(&self, payloads: &[RecordPayload]) -> RemoteResult<Vec<i64>> {
        self.submitted_batches.lock().unwrap().push(payloads.to_vec());
        self.batch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn login(&self, _username: &str, _password: &str) -> RemoteResult<LoginResponse> {
        self.login_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

/// The full service graph over an in-memory store and a scripted gateway.
pub struct TestApp {
    pub store: Arc<dyn LocalStore>,
    pub kv: Arc<dyn KeyValueStore>,
    pub gateway: Arc<FakeGateway>,
    pub connectivity: Arc<SharedConnectivityFlag>,
    pub records: Arc<RecordService>,
    pub references: Arc<ReferenceSyncService>,
    pub flush: Arc<FlushService>,
    pub sessions: Arc<SessionService>,
}

pub async fn test_app(online: bool) -> TestApp {
    let pool = memory_pool().await;
    let store: Arc<dyn LocalStore> = Arc::new(SqliteLocalStore::new(pool.clone()));
    let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));
    let gateway = Arc::new(FakeGateway::new());
    let gateway_port: Arc<dyn RemoteGateway> = gateway.clone();
    let connectivity = Arc::new(SharedConnectivityFlag::new(online));
    let probe: Arc<dyn ConnectivityProbe> = connectivity.clone();

    let references = Arc::new(ReferenceSyncService::new(store.clone(), gateway_port.clone()));
    let records = Arc::new(RecordService::new(
        store.clone(),
        gateway_port.clone(),
        probe.clone(),
        references.clone(),
    ));
    let flush = Arc::new(FlushService::new(
        store.clone(),
        gateway_port.clone(),
        probe.clone(),
    ));
    let sessions = Arc::new(SessionService::new(
        kv.clone(),
        gateway_port,
        probe,
        references.clone(),
        24,
    ));

    TestApp {
        store,
        kv,
        gateway,
        connectivity,
        records,
        references,
        flush,
        sessions,
    }
}

/// Put a couple of catalog rows in the piecework mirror so that drafts
/// referencing them pass submission-time validation.
pub async fn seed_piecework(store: &Arc<dyn LocalStore>, ids: &[i64]) {
    for id in ids {
        let item = CatalogItem {
            id: *id,
            plant: Some("TODAS".to_string()),
            concept: format!("Concepto {id}"),
            value: Some(1000.0),
        };
        store
            .put(
                Collection::Piecework,
                &StoreKey::natural(id.to_string()),
                serde_json::to_value(&item).unwrap(),
            )
            .await
            .unwrap();
    }
}

pub fn juan_draft() -> RecordDraft {
    RecordDraft {
        employee_name: "Juan Pérez".to_string(),
        employee_document: "123".to_string(),
        catalog_id: Some(7),
        quantity: 3,
        date: Some("2024-05-01".parse().unwrap()),
        plant: None,
    }
}
