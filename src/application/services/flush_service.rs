use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::ports::{Collection, ConnectivityProbe, LocalStore, RemoteGateway, StoreKey};
use crate::domain::entities::RecordPayload;
use crate::domain::value_objects::LocalKey;
use crate::shared::error::{AppError, Result};

/// Why a flush attempt was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    AppStart,
    ConnectivityRegained,
    BecameVisible,
}

/// Result of a flush attempt. Failure leaves the queue untouched for the
/// next trigger and is not an application error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No connectivity; nothing attempted.
    Offline,
    /// The queue was empty.
    Empty,
    /// Another flush was already in flight; this trigger was skipped.
    AlreadyRunning,
    /// The authority accepted the batch. Carries the remote id assigned to
    /// each flushed local key, in submission order.
    Flushed { assignments: Vec<(LocalKey, i64)> },
    /// The submit failed; every queued entry is still in place.
    Failed { message: String },
}

/// Submits the pending queue to the bulk-sync endpoint. At most one flush
/// is in flight at a time; the clear after acceptance is scoped to the
/// snapshot read at flush start, so entries enqueued mid-flight survive.
pub struct FlushService {
    store: Arc<dyn LocalStore>,
    gateway: Arc<dyn RemoteGateway>,
    connectivity: Arc<dyn ConnectivityProbe>,
    in_flight: Mutex<()>,
}

impl FlushService {
    pub fn new(
        store: Arc<dyn LocalStore>,
        gateway: Arc<dyn RemoteGateway>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            store,
            gateway,
            connectivity,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn handle_trigger(&self, trigger: SyncTrigger) -> Result<FlushOutcome> {
        debug!(?trigger, "flush trigger received");
        self.flush().await
    }

    pub async fn flush(&self) -> Result<FlushOutcome> {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("flush already in flight, skipping trigger");
                return Ok(FlushOutcome::AlreadyRunning);
            }
        };

        if !self.connectivity.is_online() {
            return Ok(FlushOutcome::Offline);
        }

        // Snapshot the queue in insertion order. Only these keys may be
        // cleared afterwards.
        let entries = self.store.get_all(Collection::Queue).await?;
        if entries.is_empty() {
            return Ok(FlushOutcome::Empty);
        }

        let mut keys = Vec::with_capacity(entries.len());
        let mut payloads: Vec<RecordPayload> = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.key {
                StoreKey::Seq(key) => keys.push(key),
                StoreKey::Natural(key) => {
                    return Err(AppError::Storage(format!(
                        "queue entry with natural key: {key}"
                    )));
                }
            }
            payloads.push(serde_json::from_value(entry.value)?);
        }

        match self.gateway.submit_batch(&payloads).await {
            Ok(remote_ids) => {
                for key in &keys {
                    self.store
                        .delete(Collection::Queue, &StoreKey::Seq(*key))
                        .await?;
                }
                info!(submitted = keys.len(), "pending queue flushed");
                Ok(FlushOutcome::Flushed {
                    assignments: keys.into_iter().zip(remote_ids).collect(),
                })
            }
            Err(err) => {
                warn!(%err, pending = keys.len(), "flush failed, queue left intact");
                Ok(FlushOutcome::Failed {
                    message: err.message,
                })
            }
        }
    }
}
