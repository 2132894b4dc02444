use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::pending_mutation::{RecordPayload, RecordRow};
use crate::domain::value_objects::{CatalogId, DocumentNumber, LocalKey, Quantity, RecordId};

/// Lifecycle state of a work record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordState {
    Draft,
    /// Accepted by the remote authority; identity is the remote id.
    RemoteCommitted,
    /// Waiting in the local pending queue.
    LocallyQueued,
    /// Queued and edited again since it was queued.
    LocallyQueuedDirty,
}

/// Snapshot of the editable fields, taken when an edit starts so that a
/// cancelled edit can restore them.
#[derive(Debug, Clone, PartialEq)]
struct EditBackup {
    catalog_id: CatalogId,
    concept: Option<String>,
    quantity: Quantity,
    date: NaiveDate,
}

/// A piecework production event against an employee and plant.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkRecord {
    pub id: RecordId,
    pub employee_document: DocumentNumber,
    pub employee_name: String,
    pub catalog_id: CatalogId,
    pub concept: Option<String>,
    pub quantity: Quantity,
    pub date: NaiveDate,
    pub plant: Option<String>,
    pub state: RecordState,
    /// Set while the record exists only in the local pending queue.
    pub offline_origin: bool,
    /// Transient UI flag; never meaningful once persisted.
    pub editing: bool,
    backup: Option<EditBackup>,
}

impl WorkRecord {
    pub fn remote_committed(
        remote_id: i64,
        document: DocumentNumber,
        employee_name: String,
        catalog_id: CatalogId,
        concept: Option<String>,
        quantity: Quantity,
        date: NaiveDate,
        plant: Option<String>,
    ) -> Self {
        Self {
            id: RecordId::Remote(remote_id),
            employee_document: document,
            employee_name,
            catalog_id,
            concept,
            quantity,
            date,
            plant,
            state: RecordState::RemoteCommitted,
            offline_origin: false,
            editing: false,
            backup: None,
        }
    }

    pub fn locally_queued(
        key: LocalKey,
        document: DocumentNumber,
        employee_name: String,
        catalog_id: CatalogId,
        quantity: Quantity,
        date: NaiveDate,
        plant: Option<String>,
    ) -> Self {
        Self {
            id: RecordId::Local(key),
            employee_document: document,
            employee_name,
            catalog_id,
            concept: None,
            quantity,
            date,
            plant,
            state: RecordState::LocallyQueued,
            offline_origin: true,
            editing: false,
            backup: None,
        }
    }

    pub fn from_remote_row(row: RecordRow) -> Result<Self, String> {
        Ok(Self::remote_committed(
            row.id,
            DocumentNumber::new(row.employee_document)?,
            row.employee_name,
            CatalogId::new(row.catalog_id)?,
            row.concept,
            Quantity::new(row.quantity)?,
            row.date,
            row.plant,
        ))
    }

    /// Identifier safe to key a rendered row with.
    pub fn ui_id(&self) -> String {
        self.id.ui_id()
    }

    pub fn payload(&self) -> RecordPayload {
        RecordPayload::new(
            &self.employee_document,
            &self.employee_name,
            self.catalog_id,
            self.quantity,
            self.date,
            self.plant.clone(),
        )
    }

    /// Capture a backup of the editable fields and enter edit mode.
    pub fn begin_edit(&mut self) {
        self.backup = Some(EditBackup {
            catalog_id: self.catalog_id,
            concept: self.concept.clone(),
            quantity: self.quantity,
            date: self.date,
        });
        self.editing = true;
    }

    /// Discard in-progress edits, restoring the backup snapshot. Persisted
    /// and queued state are untouched.
    pub fn cancel_edit(&mut self) {
        if let Some(backup) = self.backup.take() {
            self.catalog_id = backup.catalog_id;
            self.concept = backup.concept;
            self.quantity = backup.quantity;
            self.date = backup.date;
        }
        self.editing = false;
    }

    /// Leave edit mode keeping the current values; the backup now reflects
    /// them so a later cancel restores to this point.
    pub fn finish_edit(&mut self) {
        self.editing = false;
        self.backup = Some(EditBackup {
            catalog_id: self.catalog_id,
            concept: self.concept.clone(),
            quantity: self.quantity,
            date: self.date,
        });
    }

    pub fn apply_edit(&mut self, catalog_id: CatalogId, quantity: Quantity, date: NaiveDate) {
        self.catalog_id = catalog_id;
        self.quantity = quantity;
        self.date = date;
    }

    /// Re-key the record onto a freshly assigned local queue key. Happens
    /// when a remote mutation fails and the record falls back to the queue.
    pub fn adopt_local_key(&mut self, key: LocalKey) {
        self.id = RecordId::Local(key);
        self.offline_origin = true;
        self.state = RecordState::LocallyQueuedDirty;
    }

    /// One-way transition from local to remote identity, upon first
    /// acceptance by the authority.
    pub fn adopt_remote_id(&mut self, remote_id: i64) {
        self.id = RecordId::Remote(remote_id);
        self.offline_origin = false;
        self.state = RecordState::RemoteCommitted;
    }
}

/// User input for a new record, before validation.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub employee_name: String,
    pub employee_document: String,
    pub catalog_id: Option<i64>,
    pub quantity: i64,
    pub date: Option<NaiveDate>,
    pub plant: Option<String>,
}

/// Editable fields of an existing record, as submitted by the edit form.
#[derive(Debug, Clone)]
pub struct RecordEdit {
    pub catalog_id: i64,
    pub quantity: i64,
    pub date: Option<NaiveDate>,
}
