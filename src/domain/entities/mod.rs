mod pending_mutation;
mod reference;
mod session;
mod work_record;

pub use pending_mutation::{PendingMutation, RecordPayload, RecordRow};
pub use reference::{
    CachedUser, CatalogHit, CatalogItem, Employee, EmployeeHit, Plant, ReferenceRow,
    PLANT_WILDCARD,
};
pub use session::{Session, SessionUser};
pub use work_record::{RecordDraft, RecordEdit, RecordState, WorkRecord};
