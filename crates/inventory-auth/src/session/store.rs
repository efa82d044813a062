//! Session store: the single owner of the durable token and user profile.

use std::sync::Arc;

use http::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{info, warn};
use validator::Validate;

use inventory_core::config::AppConfig;
use inventory_core::config::SessionConfig;
use inventory_core::error::AppError;
use inventory_core::result::AppResult;
use inventory_core::traits::SessionStorage;
use inventory_entity::auth::{LoginRequest, SignupRequest};
use inventory_entity::session::Session;
use inventory_entity::user::UserProfile;

use crate::client::AuthClient;
use crate::storage;
use crate::token::TokenInspector;

/// Holds the authenticated session in durable storage.
///
/// Nothing is cached in memory: every read goes to the storage backend, so
/// a fresh process reconstructs the session exactly as it was left. The
/// token and the user profile are always written and cleared in one batch.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    client: AuthClient,
    token_key: String,
    user_key: String,
}

impl SessionStore {
    /// Creates a store over an explicit storage backend.
    pub fn new(storage: Arc<dyn SessionStorage>, client: AuthClient, config: &SessionConfig) -> Self {
        Self {
            storage,
            client,
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    /// Creates a store with the backend and services named in configuration.
    pub fn from_config(config: &AppConfig, http: reqwest::Client) -> Self {
        Self::new(
            storage::from_config(&config.session),
            AuthClient::from_config(http, &config.services),
            &config.session,
        )
    }

    /// Authenticates against the user service and persists the session.
    ///
    /// A reply is only accepted when it carries both a token and a user;
    /// otherwise nothing is stored and the server's message is returned.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let reply = self.client.login(&request).await?;

        let (token, user) = match (reply.success, reply.token.as_deref(), reply.user.as_ref()) {
            (true, Some(token), Some(user)) if !token.is_empty() => (token.to_string(), user.clone()),
            _ => {
                let message = reply.failure_message();
                warn!(username, %message, "Login rejected");
                return Err(AppError::authentication(message));
            }
        };

        let session = Session::new(token, user);
        self.persist(&session).await?;
        info!(username, role = %session.role(), "Login succeeded");
        Ok(session)
    }

    /// Registers a new account. Does not sign in.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<String> {
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.client.signup(request).await
    }

    /// Clears the token and user profile together. No network call is made.
    pub async fn logout(&self) -> AppResult<()> {
        self.storage
            .remove_many(&[self.token_key.as_str(), self.user_key.as_str()])
            .await?;
        info!("Session cleared");
        Ok(())
    }

    /// The stored bearer token.
    pub async fn get_token(&self) -> AppResult<Option<String>> {
        self.storage.get(&self.token_key).await
    }

    /// The stored user profile. An unreadable profile reads as absent.
    pub async fn get_user(&self) -> AppResult<Option<UserProfile>> {
        let Some(raw) = self.storage.get(&self.user_key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored user profile is unreadable");
                Ok(None)
            }
        }
    }

    /// The full session, if both halves are present.
    pub async fn get_session(&self) -> AppResult<Option<Session>> {
        let token = self.get_token().await?.filter(|t| !t.is_empty());
        let user = self.get_user().await?;
        Ok(token.zip(user).map(|(token, user)| Session::new(token, user)))
    }

    /// True iff a non-empty token is stored. Storage failures read as false.
    pub async fn is_authenticated(&self) -> bool {
        match self.get_token().await {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                false
            }
        }
    }

    /// `Authorization: Bearer <token>`, or an empty map without a session.
    /// Never fails.
    pub async fn auth_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = match self.get_token().await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return headers,
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                return headers;
            }
        };
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// Raw role string of the stored user.
    pub async fn get_user_role(&self) -> Option<String> {
        self.stored_user()
            .await
            .map(|u| u.role)
            .filter(|r| !r.is_empty())
    }

    /// Whether the stored user's role matches or contains `role`.
    pub async fn has_role(&self, role: &str) -> bool {
        self.stored_user().await.is_some_and(|u| u.has_role(role))
    }

    /// Whether the stored user matches any of `roles`.
    pub async fn has_any_role(&self, roles: &[&str]) -> bool {
        self.stored_user().await.is_some_and(|u| u.has_any_role(roles))
    }

    /// Whether the stored user may use the supplier screens.
    pub async fn can_access_supplier_service(&self) -> bool {
        self.stored_user()
            .await
            .is_some_and(|u| u.can_access_supplier_service())
    }

    /// Whether the stored token is missing, unreadable or past its expiry.
    pub async fn is_token_expired(&self) -> bool {
        match self.get_token().await {
            Ok(Some(token)) => TokenInspector::is_expired(&token),
            _ => true,
        }
    }

    /// Re-validates the stored token with the API gateway.
    ///
    /// On success the stored profile is replaced with the gateway's copy.
    /// Any rejection or transport failure clears the session.
    pub async fn verify(&self) -> AppResult<Option<Session>> {
        let Some(token) = self.get_token().await?.filter(|t| !t.is_empty()) else {
            self.logout().await?;
            return Ok(None);
        };

        match self.client.current_user(&token).await {
            Ok(user) => {
                let session = Session::new(token, user);
                self.persist(&session).await?;
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Session verification failed, clearing session");
                self.logout().await?;
                Ok(None)
            }
        }
    }

    async fn stored_user(&self) -> Option<UserProfile> {
        self.get_user().await.ok().flatten()
    }

    async fn persist(&self, session: &Session) -> AppResult<()> {
        let user = serde_json::to_string(&session.user)?;
        self.storage
            .set_many(&[
                (self.token_key.as_str(), session.token.clone()),
                (self.user_key.as_str(), user),
            ])
            .await
    }
}
