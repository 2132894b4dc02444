use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query filter for the record list: by employee document, date range and
/// plant. Applied server-side when online and against the local queue when
/// offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub document: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub plant: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, document: &str, date: NaiveDate, plant: Option<&str>) -> bool {
        if let Some(wanted) = self.document.as_deref() {
            if !wanted.is_empty() && wanted != document {
                return false;
            }
        }
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        if let Some(wanted) = self.plant.as_deref() {
            if !wanted.is_empty() && plant != Some(wanted) {
                return false;
            }
        }
        true
    }
}
