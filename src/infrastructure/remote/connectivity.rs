use std::sync::atomic::{AtomicBool, Ordering};

use crate::application::ports::ConnectivityProbe;

/// Network-presence flag flipped by the shell on online/offline events.
pub struct SharedConnectivityFlag {
    online: AtomicBool,
}

impl SharedConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// Update the flag, returning the previous value so callers can detect
    /// the offline-to-online transition.
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::SeqCst)
    }
}

impl ConnectivityProbe for SharedConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
