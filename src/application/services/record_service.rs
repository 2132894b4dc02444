use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::application::ports::{Collection, ConnectivityProbe, LocalStore, RemoteGateway, StoreKey};
use crate::application::services::ReferenceSyncService;
use crate::domain::entities::{
    CatalogHit, EmployeeHit, PendingMutation, RecordDraft, RecordEdit, RecordPayload, RecordState,
    WorkRecord,
};
use crate::domain::value_objects::{
    CatalogId, DocumentNumber, Quantity, RecordFilter, RecordId, SaveStatus,
};
use crate::shared::error::{AppError, Result, ValidationErrors};

/// Result of a create: the reconciled record plus how it was saved.
#[derive(Debug)]
pub struct CreateOutcome {
    pub record: WorkRecord,
    pub status: SaveStatus,
}

/// Owns every `WorkRecord` transition: create, edit, delete, and the
/// decision between applying a mutation remotely or queuing it locally.
pub struct RecordService {
    store: Arc<dyn LocalStore>,
    gateway: Arc<dyn RemoteGateway>,
    connectivity: Arc<dyn ConnectivityProbe>,
    references: Arc<ReferenceSyncService>,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn LocalStore>,
        gateway: Arc<dyn RemoteGateway>,
        connectivity: Arc<dyn ConnectivityProbe>,
        references: Arc<ReferenceSyncService>,
    ) -> Self {
        Self {
            store,
            gateway,
            connectivity,
            references,
        }
    }

    /// Create a record from a validated draft. Online, the remote authority
    /// is tried first; a remote failure (or being offline from the start)
    /// queues the payload locally and reports `SavedOffline`.
    pub async fn create(&self, draft: RecordDraft) -> Result<CreateOutcome> {
        let (document, catalog_id, quantity, date) = self.validate_draft(&draft).await?;
        let payload = RecordPayload::new(
            &document,
            &draft.employee_name,
            catalog_id,
            quantity,
            date,
            draft.plant.clone(),
        );

        if self.connectivity.is_online() {
            match self.gateway.create_record(&payload).await {
                Ok(remote_id) => {
                    info!(remote_id, "record committed remotely");
                    return Ok(CreateOutcome {
                        record: WorkRecord::remote_committed(
                            remote_id,
                            document,
                            draft.employee_name,
                            catalog_id,
                            None,
                            quantity,
                            date,
                            draft.plant,
                        ),
                        status: SaveStatus::SavedRemote,
                    });
                }
                Err(err) => {
                    warn!(%err, "remote create failed, queuing locally");
                }
            }
        }

        let key = self
            .store
            .add(Collection::Queue, serde_json::to_value(&payload)?)
            .await?;
        info!(%key, "record queued locally");
        Ok(CreateOutcome {
            record: WorkRecord::locally_queued(
                key,
                document,
                draft.employee_name,
                catalog_id,
                quantity,
                date,
                draft.plant,
            ),
            status: SaveStatus::SavedOffline,
        })
    }

    pub fn begin_edit(&self, record: &mut WorkRecord) {
        record.begin_edit();
    }

    /// Drop unsaved edits; queued/persisted state is untouched.
    pub fn cancel_edit(&self, record: &mut WorkRecord) {
        record.cancel_edit();
    }

    /// Save an edit. A remote-committed record is updated remotely while
    /// online; any failure, or a record already queued, upserts the merged
    /// payload into the pending queue instead.
    pub async fn save_edit(&self, record: &mut WorkRecord, edit: RecordEdit) -> Result<SaveStatus> {
        let (catalog_id, quantity, date) = self.validate_edit(&edit).await?;
        record.apply_edit(catalog_id, quantity, date);
        let payload = record.payload();

        if self.connectivity.is_online() {
            if let Some(remote_id) = record.id.remote() {
                match self.gateway.update_record(remote_id, &payload).await {
                    Ok(()) => {
                        record.state = RecordState::RemoteCommitted;
                        record.finish_edit();
                        info!(remote_id, "record updated remotely");
                        return Ok(SaveStatus::SavedRemote);
                    }
                    Err(err) => {
                        warn!(%err, remote_id, "remote update failed, queuing locally");
                    }
                }
            }
        }

        let value = serde_json::to_value(&payload)?;
        match record.id.local() {
            Some(key) => {
                self.store
                    .put(Collection::Queue, &StoreKey::Seq(key), value)
                    .await?;
                record.state = RecordState::LocallyQueuedDirty;
                record.offline_origin = true;
            }
            None => {
                let key = self.store.add(Collection::Queue, value).await?;
                record.adopt_local_key(key);
            }
        }
        record.finish_edit();
        info!(ui_id = %record.ui_id(), "edit queued locally");
        Ok(SaveStatus::SavedOffline)
    }

    /// Delete a record. Queue-only records are removed from the local
    /// queue, any connectivity. Remote records require being online; the
    /// offline delete of a remote record is refused outright.
    pub async fn delete(&self, record: &WorkRecord) -> Result<()> {
        match record.id {
            RecordId::Local(key) => {
                self.store
                    .delete(Collection::Queue, &StoreKey::Seq(key))
                    .await?;
                info!(%key, "queued record removed locally");
                Ok(())
            }
            RecordId::Remote(remote_id) => {
                if !self.connectivity.is_online() {
                    return Err(AppError::OfflineDeleteRefused);
                }
                self.gateway.delete_record(remote_id).await?;
                info!(remote_id, "record deleted remotely");
                Ok(())
            }
        }
    }

    /// Query records by document, date range and plant. Online, the
    /// authority answers; offline (or on remote failure) the pending queue
    /// is mapped to offline-origin records and filtered locally.
    pub async fn query_records(&self, filter: &RecordFilter) -> Result<Vec<WorkRecord>> {
        if self.connectivity.is_online() {
            match self.gateway.query_records(filter).await {
                Ok(rows) => {
                    let mut records = Vec::with_capacity(rows.len());
                    for row in rows {
                        records.push(
                            WorkRecord::from_remote_row(row)
                                .map_err(AppError::Serialization)?,
                        );
                    }
                    return Ok(records);
                }
                Err(err) => {
                    warn!(%err, "record query failed, using local queue");
                }
            }
        }

        let mut records = Vec::new();
        for mutation in self.pending_mutations().await? {
            let payload = mutation.payload;
            if !filter.matches(&payload.employee_document, payload.date, payload.plant.as_deref())
            {
                continue;
            }
            records.push(WorkRecord::locally_queued(
                mutation.key,
                DocumentNumber::new(payload.employee_document)
                    .map_err(AppError::Serialization)?,
                payload.employee_name,
                CatalogId::new(payload.catalog_id).map_err(AppError::Serialization)?,
                Quantity::new(payload.quantity).map_err(AppError::Serialization)?,
                payload.date,
                payload.plant,
            ));
        }
        Ok(records)
    }

    /// The pending queue in insertion order.
    pub async fn pending_mutations(&self) -> Result<Vec<PendingMutation>> {
        let mut mutations = Vec::new();
        for entry in self.store.get_all(Collection::Queue).await? {
            let key = match entry.key {
                StoreKey::Seq(key) => key,
                StoreKey::Natural(key) => {
                    return Err(AppError::Storage(format!(
                        "queue entry with natural key: {key}"
                    )));
                }
            };
            mutations.push(PendingMutation {
                key,
                payload: serde_json::from_value(entry.value)?,
            });
        }
        Ok(mutations)
    }

    /// Match a typed employee name against the loaded list, assigning the
    /// document number of the exact (case-insensitive) hit.
    pub fn resolve_document(employees: &[EmployeeHit], name: &str) -> Option<String> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        employees
            .iter()
            .find(|e| e.name.trim().to_lowercase() == wanted)
            .map(|e| e.document.clone())
    }

    /// Match a typed concept against the loaded catalog list.
    pub fn resolve_catalog_id(items: &[CatalogHit], concept: &str) -> Option<i64> {
        let wanted = concept.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        items
            .iter()
            .find(|d| d.concept.trim().to_lowercase() == wanted)
            .map(|d| d.id)
    }

    async fn validate_draft(
        &self,
        draft: &RecordDraft,
    ) -> Result<(DocumentNumber, CatalogId, Quantity, NaiveDate)> {
        let mut errors = ValidationErrors::new();

        if draft.employee_name.trim().is_empty() {
            errors.add("empleado_nombre", "an employee must be selected");
        }
        let document = match DocumentNumber::new(draft.employee_document.clone()) {
            Ok(document) => Some(document),
            Err(_) => {
                errors.add("empleado_documento", "the employee has no document assigned");
                None
            }
        };
        let catalog_id = self.validate_catalog(draft.catalog_id, &mut errors).await?;
        let quantity = match Quantity::new(draft.quantity) {
            Ok(quantity) => Some(quantity),
            Err(_) => {
                errors.add("cantidad", "quantity must be at least 1");
                None
            }
        };
        if draft.date.is_none() {
            errors.add("fecha", "a date must be selected");
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        // Unwraps guarded by the emptiness check above.
        Ok((
            document.unwrap(),
            catalog_id.unwrap(),
            quantity.unwrap(),
            draft.date.unwrap(),
        ))
    }

    async fn validate_edit(&self, edit: &RecordEdit) -> Result<(CatalogId, Quantity, NaiveDate)> {
        let mut errors = ValidationErrors::new();

        let catalog_id = self.validate_catalog(Some(edit.catalog_id), &mut errors).await?;
        let quantity = match Quantity::new(edit.quantity) {
            Ok(quantity) => Some(quantity),
            Err(_) => {
                errors.add("cantidad", "quantity must be at least 1");
                None
            }
        };
        if edit.date.is_none() {
            errors.add("fecha", "a date must be selected");
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok((catalog_id.unwrap(), quantity.unwrap(), edit.date.unwrap()))
    }

    /// The catalog id must resolve against the local piecework mirror at
    /// submission time. An empty mirror cannot vouch either way, so only a
    /// populated mirror rejects unknown ids.
    async fn validate_catalog(
        &self,
        catalog_id: Option<i64>,
        errors: &mut ValidationErrors,
    ) -> Result<Option<CatalogId>> {
        let id = match catalog_id.map(CatalogId::new) {
            Some(Ok(id)) => id,
            _ => {
                errors.add("destajo", "a valid piecework item must be selected");
                return Ok(None);
            }
        };
        if self.references.has_catalog_entries().await?
            && self.references.catalog_item(id).await?.is_none()
        {
            errors.add("destajo", "the selected piecework item is not in the catalog");
            return Ok(None);
        }
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits() -> Vec<EmployeeHit> {
        vec![
            EmployeeHit {
                name: "Juan Pérez".to_string(),
                document: "123".to_string(),
            },
            EmployeeHit {
                name: "Ana Gómez".to_string(),
                document: "456".to_string(),
            },
        ]
    }

    #[test]
    fn resolves_document_case_insensitively() {
        assert_eq!(
            RecordService::resolve_document(&hits(), "  juan pérez "),
            Some("123".to_string())
        );
        assert_eq!(RecordService::resolve_document(&hits(), "Pedro"), None);
        assert_eq!(RecordService::resolve_document(&hits(), ""), None);
    }

    #[test]
    fn resolves_catalog_by_concept() {
        let items = vec![
            CatalogHit {
                id: 7,
                plant: None,
                concept: "Poda".to_string(),
                value: None,
            },
            CatalogHit {
                id: 9,
                plant: None,
                concept: "Corte".to_string(),
                value: None,
            },
        ];
        assert_eq!(RecordService::resolve_catalog_id(&items, "poda"), Some(7));
        assert_eq!(RecordService::resolve_catalog_id(&items, "Siembra"), None);
    }
}
