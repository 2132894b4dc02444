mod flush_service;
mod record_service;
mod reference_sync_service;
mod session_service;

pub use flush_service::{FlushOutcome, FlushService, SyncTrigger};
pub use record_service::{CreateOutcome, RecordService};
pub use reference_sync_service::{ReconcileOutcome, ReferenceSyncService, SyncReport};
pub use session_service::{hash_password, SessionService};
