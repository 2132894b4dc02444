use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::error::{AppError, RemoteError, Result};

/// Thin typed wrapper over the HTTP transport. A transport failure, a
/// non-2xx status or an unparseable body is always an error, never a value.
pub struct HttpClient {
    base_url: String,
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("http client: {err}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            inner,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, RemoteError> {
        Self::execute(self.inner.get(self.url(path)).query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, RemoteError> {
        Self::execute(self.inner.post(self.url(path)).json(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, RemoteError> {
        Self::execute(self.inner.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, RemoteError> {
        Self::execute(self.inner.delete(self.url(path))).await
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|err| RemoteError::transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(RemoteError::status(status.as_u16(), body));
        }
        serde_json::from_str(&body)
            .map_err(|err| RemoteError::status(status.as_u16(), format!("invalid JSON body: {err}")))
    }
}
