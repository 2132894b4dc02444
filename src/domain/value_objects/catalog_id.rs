use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an entry in the piecework catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogId(i64);

impl CatalogId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Catalog id must be positive".to_string());
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CatalogId> for i64 {
    fn from(id: CatalogId) -> Self {
        id.0
    }
}
