use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ConnectivityProbe, KeyValueStore, LocalStore, RemoteGateway};
use crate::application::services::{
    FlushOutcome, FlushService, RecordService, ReferenceSyncService, SessionService, SyncTrigger,
};
use crate::infrastructure::remote::{HttpClient, HttpRemoteGateway, SharedConnectivityFlag};
use crate::infrastructure::storage::{self, SqliteKeyValueStore, SqliteLocalStore};
use crate::shared::config::AppConfig;
use crate::shared::error::Result;

/// Owns the wiring of every component. The database handle is opened here
/// and passed down explicitly; there are no ambient globals.
pub struct AppState {
    pub config: AppConfig,
    pub connectivity: Arc<SharedConnectivityFlag>,
    pub records: Arc<RecordService>,
    pub references: Arc<ReferenceSyncService>,
    pub flush: Arc<FlushService>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let pool = storage::connect(&config.database).await?;
        let store: Arc<dyn LocalStore> = Arc::new(SqliteLocalStore::new(pool.clone()));
        let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

        let client = HttpClient::new(
            &config.remote.base_url,
            Duration::from_secs(config.remote.timeout_secs),
        )?;
        let gateway: Arc<dyn RemoteGateway> = Arc::new(HttpRemoteGateway::new(client));

        let connectivity = Arc::new(SharedConnectivityFlag::new(true));
        let probe: Arc<dyn ConnectivityProbe> = connectivity.clone();

        let references = Arc::new(ReferenceSyncService::new(store.clone(), gateway.clone()));
        let records = Arc::new(RecordService::new(
            store.clone(),
            gateway.clone(),
            probe.clone(),
            references.clone(),
        ));
        let flush = Arc::new(FlushService::new(store, gateway.clone(), probe.clone()));
        let sessions = Arc::new(SessionService::new(
            kv,
            gateway,
            probe,
            references.clone(),
            config.sync.session_ttl_hours,
        ));

        Ok(Self {
            config,
            connectivity,
            records,
            references,
            flush,
            sessions,
        })
    }

    /// Application-load trigger: reconcile the mirrors when reachable, then
    /// flush the pending queue.
    pub async fn start(&self) -> Result<()> {
        if self.connectivity.is_online() {
            self.references.sync_all().await?;
        }
        if self.config.sync.flush_on_start {
            self.flush.handle_trigger(SyncTrigger::AppStart).await?;
        }
        Ok(())
    }

    /// Connectivity callback from the shell. Regaining connectivity fires
    /// a flush attempt.
    pub async fn set_online(&self, online: bool) -> Result<Option<FlushOutcome>> {
        let was_online = self.connectivity.set_online(online);
        if online && !was_online {
            let outcome = self
                .flush
                .handle_trigger(SyncTrigger::ConnectivityRegained)
                .await?;
            return Ok(Some(outcome));
        }
        Ok(None)
    }

    /// Page/tab visibility callback from the shell.
    pub async fn became_visible(&self) -> Result<FlushOutcome> {
        self.flush.handle_trigger(SyncTrigger::BecameVisible).await
    }
}
