use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{LoginResponse, RemoteGateway, RemoteResult};
use crate::domain::entities::{
    CachedUser, CatalogHit, CatalogItem, Employee, EmployeeHit, Plant, RecordPayload, RecordRow,
};
use crate::domain::value_objects::RecordFilter;
use crate::infrastructure::remote::HttpClient;
use crate::shared::error::RemoteError;

#[derive(Debug, Deserialize)]
struct AckResponse {
    ok: bool,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    ok: bool,
    id: i64,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    ok: bool,
    ids: Vec<i64>,
}

#[derive(Debug, serde::Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

fn rejected() -> RemoteError {
    RemoteError::transport("authority rejected the request")
}

/// `RemoteGateway` over the HTTP API of the authority.
pub struct HttpRemoteGateway {
    client: HttpClient,
}

impl HttpRemoteGateway {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn search_query(query: &str, plant: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !query.is_empty() {
            params.push(("q", query.to_string()));
        }
        if let Some(plant) = plant.filter(|p| !p.is_empty()) {
            params.push(("planta", plant.to_string()));
        }
        params
    }
}

#[async_trait]
impl RemoteGateway for HttpRemoteGateway {
    async fn fetch_employees(&self) -> RemoteResult<Vec<Employee>> {
        self.client.get("/api/empleados", &[]).await
    }

    async fn fetch_piecework(&self) -> RemoteResult<Vec<CatalogItem>> {
        self.client.get("/api/mdestajos", &[]).await
    }

    async fn fetch_plants(&self) -> RemoteResult<Vec<Plant>> {
        self.client.get("/api/plantas", &[]).await
    }

    async fn fetch_users(&self) -> RemoteResult<Vec<CachedUser>> {
        self.client.get("/auth/users", &[]).await
    }

    async fn search_employees(
        &self,
        query: &str,
        plant: Option<&str>,
    ) -> RemoteResult<Vec<EmployeeHit>> {
        self.client
            .get("/api/employees", &Self::search_query(query, plant))
            .await
    }

    async fn search_piecework(
        &self,
        query: &str,
        plant: Option<&str>,
    ) -> RemoteResult<Vec<CatalogHit>> {
        self.client
            .get("/api/destajos", &Self::search_query(query, plant))
            .await
    }

    async fn query_records(&self, filter: &RecordFilter) -> RemoteResult<Vec<RecordRow>> {
        let mut params = Vec::new();
        if let Some(document) = filter.document.as_deref().filter(|d| !d.is_empty()) {
            params.push(("documento", document.to_string()));
        }
        if let Some(from) = filter.from {
            params.push(("desde", from.to_string()));
        }
        if let Some(to) = filter.to {
            params.push(("hasta", to.to_string()));
        }
        if let Some(plant) = filter.plant.as_deref().filter(|p| !p.is_empty()) {
            params.push(("planta", plant.to_string()));
        }
        self.client.get("/api/registros", &params).await
    }

    async fn create_record(&self, payload: &RecordPayload) -> RemoteResult<i64> {
        let response: CreateResponse = self.client.post("/api/registros", payload).await?;
        if !response.ok {
            return Err(rejected());
        }
        Ok(response.id)
    }

    async fn update_record(&self, id: i64, payload: &RecordPayload) -> RemoteResult<()> {
        let response: AckResponse = self
            .client
            .put(&format!("/api/registros/{id}"), payload)
            .await?;
        if !response.ok {
            return Err(rejected());
        }
        Ok(())
    }

    async fn delete_record(&self, id: i64) -> RemoteResult<()> {
        let response: AckResponse = self.client.delete(&format!("/api/registros/{id}")).await?;
        if !response.ok {
            return Err(rejected());
        }
        Ok(())
    }

    async fn submit_batch(&self, payloads: &[RecordPayload]) -> RemoteResult<Vec<i64>> {
        let response: BatchResponse = self.client.post("/api/sync", payloads).await?;
        if !response.ok {
            return Err(rejected());
        }
        Ok(response.ids)
    }

    async fn login(&self, username: &str, password: &str) -> RemoteResult<LoginResponse> {
        self.client
            .post("/auth/api/login", &LoginRequest { username, password })
            .await
    }
}
