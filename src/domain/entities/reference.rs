use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Plant value that matches every plant in reference filtering.
pub const PLANT_WILDCARD: &str = "TODAS";

/// A row of a read-mostly lookup table mirrored locally for offline use.
/// The natural key doubles as the remote identity and the local store key.
pub trait ReferenceRow: Serialize + DeserializeOwned + Send + Sync {
    fn natural_key(&self) -> String;
}

/// Employee master row as served by `GET /api/empleados`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "numeroDocumento")]
    pub document_number: String,
    #[serde(rename = "tipoIdentificacion", default)]
    pub id_type: Option<String>,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "apellidoCompleto", default)]
    pub full_surname: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
    #[serde(rename = "centroCosto", default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(rename = "nombreNomina", default)]
    pub payroll_name: Option<String>,
    #[serde(default)]
    pub compania: Option<String>,
    /// Plant grouping tag used for offline plant filtering.
    #[serde(rename = "agrupador4", default)]
    pub plant_group: Option<String>,
}

impl ReferenceRow for Employee {
    fn natural_key(&self) -> String {
        self.document_number.clone()
    }
}

/// Piecework catalog row as served by `GET /api/mdestajos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Planta", default)]
    pub plant: Option<String>,
    #[serde(rename = "Concepto")]
    pub concept: String,
    #[serde(rename = "Valor", default)]
    pub value: Option<f64>,
}

impl ReferenceRow for CatalogItem {
    fn natural_key(&self) -> String {
        self.id.to_string()
    }
}

/// Plant row as served by `GET /api/plantas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    #[serde(rename = "Planta")]
    pub name: String,
}

impl ReferenceRow for Plant {
    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

/// User row mirrored from `GET /auth/users`; the offline credential cache.
/// `password_hash` is comparable to the SHA-256 hex of the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl ReferenceRow for CachedUser {
    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

/// Row of the filtered employee search (`GET /api/employees?q=&planta=`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHit {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "documento")]
    pub document: String,
}

/// Row of the filtered catalog search (`GET /api/destajos?q=&planta=`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogHit {
    pub id: i64,
    #[serde(rename = "planta", default)]
    pub plant: Option<String>,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "valor", default)]
    pub value: Option<f64>,
}
