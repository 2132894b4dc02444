//! Offline-first core for recording piecework ("destajos") production
//! events against employees and plants.
//!
//! Every mutation of a work record is either applied directly against the
//! remote authority or queued locally, and a later flush reconciles the
//! queue with the system of record. Three reference tables (employees,
//! piecework catalog, plants) are mirrored locally and kept eventually
//! consistent with the authority's snapshots.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
mod state;

pub use application::ports::{
    Collection, ConnectivityProbe, KeyValueStore, LocalStore, LoginResponse, RemoteGateway,
    RemoteResult, StoreKey, StoredEntry,
};
pub use application::services::{
    CreateOutcome, FlushOutcome, FlushService, ReconcileOutcome, RecordService,
    ReferenceSyncService, SessionService, SyncReport, SyncTrigger,
};
pub use domain::entities::{
    CachedUser, CatalogHit, CatalogItem, Employee, EmployeeHit, PendingMutation, Plant,
    RecordDraft, RecordEdit, RecordPayload, RecordRow, RecordState, Session, SessionUser,
    WorkRecord,
};
pub use domain::value_objects::{
    CatalogId, DocumentNumber, LocalKey, Quantity, RecordFilter, RecordId, SaveStatus,
    LOCAL_ID_PREFIX,
};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, RemoteError, Result, ValidationErrors};
pub use state::AppState;
