use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved marker for locally assigned identifiers. Remote identifiers are
/// bare numbers, so any id carrying this prefix can only be local.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Auto-incrementing key assigned by the local store when a record enters
/// the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalKey(i64);

impl LocalKey {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Local key must be positive".to_string());
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocalKey> for i64 {
    fn from(key: LocalKey) -> Self {
        key.0
    }
}

/// Identity of a work record. Exactly one kind is authoritative at a time;
/// a record moves from `Local` to `Remote` once, when the authority first
/// accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    Remote(i64),
    Local(LocalKey),
}

impl RecordId {
    /// Identifier safe to key a rendered row with. Local ids carry the
    /// reserved prefix, so they can never collide with a remote id.
    pub fn ui_id(&self) -> String {
        match self {
            RecordId::Remote(id) => id.to_string(),
            RecordId::Local(key) => format!("{LOCAL_ID_PREFIX}{key}"),
        }
    }

    pub fn remote(&self) -> Option<i64> {
        match self {
            RecordId::Remote(id) => Some(*id),
            RecordId::Local(_) => None,
        }
    }

    pub fn local(&self) -> Option<LocalKey> {
        match self {
            RecordId::Remote(_) => None,
            RecordId::Local(key) => Some(*key),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, RecordId::Local(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ui_id())
    }
}
