use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a successful create/update. Queuing locally is a success,
/// reported distinctly from a remote commit, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    SavedRemote,
    SavedOffline,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::SavedRemote => write!(f, "saved"),
            SaveStatus::SavedOffline => write!(f, "saved offline, pending sync"),
        }
    }
}
