/// Network-presence signal maintained by the shell. Consulted before every
/// mutation to pick the remote or the local path.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}
