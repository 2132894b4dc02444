mod connectivity;
mod kv_store;
mod local_store;
mod remote_gateway;

pub use connectivity::ConnectivityProbe;
pub use kv_store::KeyValueStore;
pub use local_store::{Collection, LocalStore, StoreKey, StoredEntry};
pub use remote_gateway::{LoginResponse, RemoteGateway, RemoteResult};
