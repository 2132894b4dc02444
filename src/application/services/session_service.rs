use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::application::ports::{ConnectivityProbe, KeyValueStore, RemoteGateway};
use crate::application::services::ReferenceSyncService;
use crate::domain::entities::{Session, SessionUser};
use crate::shared::error::{AppError, Result};

const SESSION_KEY: &str = "session";

/// Resolves identity against the remote authority first, falling back to
/// the locally cached, hashed credential when the authority is unreachable.
pub struct SessionService {
    kv: Arc<dyn KeyValueStore>,
    gateway: Arc<dyn RemoteGateway>,
    connectivity: Arc<dyn ConnectivityProbe>,
    references: Arc<ReferenceSyncService>,
    ttl_hours: i64,
}

impl SessionService {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn RemoteGateway>,
        connectivity: Arc<dyn ConnectivityProbe>,
        references: Arc<ReferenceSyncService>,
        ttl_hours: i64,
    ) -> Self {
        Self {
            kv,
            gateway,
            connectivity,
            references,
            ttl_hours,
        }
    }

    /// Authenticate. Online success caches the session, refreshes the
    /// offline credential cache and the reference mirrors. A remote
    /// failure (not an explicit rejection) falls back to the cached
    /// credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if self.connectivity.is_online() {
            match self.gateway.login(username, password).await {
                Ok(response) if response.success => {
                    let user = response.user.unwrap_or_else(|| SessionUser {
                        name: username.to_string(),
                        is_admin: false,
                    });
                    let session = Session::issue(response.token, user, self.ttl_hours);
                    self.persist(&session).await?;
                    info!(user = %session.user.name, "online login succeeded");

                    // Refresh the credential cache and the mirrors while the
                    // authority is reachable. A sync failure does not undo
                    // the login.
                    if let Err(err) = self.references.sync_users().await {
                        warn!(%err, "users mirror refresh failed");
                    }
                    if let Err(err) = self.references.sync_all().await {
                        warn!(%err, "reference sync after login failed");
                    }
                    return Ok(session);
                }
                Ok(_) => {
                    return Err(AppError::Unauthorized(
                        "username or password rejected".to_string(),
                    ));
                }
                Err(err) => {
                    warn!(%err, "online login unreachable, trying cached credentials");
                }
            }
        }
        self.login_offline(username, password).await
    }

    async fn login_offline(&self, username: &str, password: &str) -> Result<Session> {
        let hashed = hash_password(password);
        let user = self.references.find_user(username).await?;
        match user {
            Some(user) if user.password_hash == hashed => {
                let session = Session::issue(
                    None,
                    SessionUser {
                        name: user.name,
                        is_admin: user.is_admin,
                    },
                    self.ttl_hours,
                );
                self.persist(&session).await?;
                info!(user = %session.user.name, "offline login succeeded");
                Ok(session)
            }
            _ => Err(AppError::Unauthorized(
                "no matching cached credentials".to_string(),
            )),
        }
    }

    /// The cached session, if one exists and has not expired. An expired
    /// session is dropped and forces re-authentication.
    pub async fn current_session(&self) -> Result<Option<Session>> {
        let Some(value) = self.kv.get(SESSION_KEY).await? else {
            return Ok(None);
        };
        let session: Session = serde_json::from_value(value)?;
        if !session.is_valid_at(Utc::now()) {
            self.kv.delete(SESSION_KEY).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Drop the cached session. The reference mirrors stay in place for
    /// the next login.
    pub async fn logout(&self) -> Result<()> {
        self.kv.delete(SESSION_KEY).await
    }

    async fn persist(&self, session: &Session) -> Result<()> {
        self.kv
            .put(SESSION_KEY, serde_json::to_value(session)?)
            .await
    }
}

/// Fixed one-way hash applied before comparing against cached credentials:
/// SHA-256, lowercase hex.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
