mod connectivity;
mod http_client;
mod http_gateway;

pub use connectivity::SharedConnectivityFlag;
pub use http_client::HttpClient;
pub use http_gateway::HttpRemoteGateway;
