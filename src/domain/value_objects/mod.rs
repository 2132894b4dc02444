mod catalog_id;
mod document_number;
mod quantity;
mod record_filter;
mod record_id;
mod save_status;

pub use catalog_id::CatalogId;
pub use document_number::DocumentNumber;
pub use quantity::Quantity;
pub use record_filter::RecordFilter;
pub use record_id::{LocalKey, RecordId, LOCAL_ID_PREFIX};
pub use save_status::SaveStatus;
