use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CatalogId, DocumentNumber, LocalKey, Quantity};

/// Wire payload of a record create/update, exactly as `POST /api/registros`
/// and `POST /api/sync` expect it. The local queue stores this payload; the
/// local key lives in the store, never inside the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(rename = "empleado_documento")]
    pub employee_document: String,
    #[serde(rename = "empleado_nombre")]
    pub employee_name: String,
    #[serde(rename = "destajo_id")]
    pub catalog_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "planta", default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<String>,
}

impl RecordPayload {
    pub fn new(
        document: &DocumentNumber,
        employee_name: &str,
        catalog_id: CatalogId,
        quantity: Quantity,
        date: NaiveDate,
        plant: Option<String>,
    ) -> Self {
        Self {
            employee_document: document.as_str().to_string(),
            employee_name: employee_name.to_string(),
            catalog_id: catalog_id.value(),
            quantity: quantity.value(),
            date,
            plant,
        }
    }
}

/// An entry of the local pending queue: a create/update the remote
/// authority has not confirmed yet. Removed only after the authority
/// accepts the batch containing it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub key: LocalKey,
    pub payload: RecordPayload,
}

/// Record row as returned by `GET /api/registros`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: i64,
    #[serde(rename = "empleado_documento")]
    pub employee_document: String,
    #[serde(rename = "empleado_nombre")]
    pub employee_name: String,
    #[serde(rename = "destajo_id")]
    pub catalog_id: i64,
    #[serde(rename = "destajo", default)]
    pub concept: Option<String>,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "planta", default)]
    pub plant: Option<String>,
}
