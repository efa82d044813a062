//! HTTP client for the user service and the API gateway.

use reqwest::StatusCode;
use tracing::{debug, warn};

use inventory_core::config::ServicesConfig;
use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_entity::auth::{LoginRequest, LoginResponse, SignupRequest};
use inventory_entity::user::UserProfile;

/// Calls the authentication endpoints of the backend services.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    user_url: String,
    gateway_url: String,
}

impl AuthClient {
    /// Creates a client for the given service base URLs.
    pub fn new(http: reqwest::Client, user_url: &str, gateway_url: &str) -> Self {
        Self {
            http,
            user_url: user_url.trim_end_matches('/').to_string(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(http: reqwest::Client, services: &ServicesConfig) -> Self {
        Self::new(http, &services.user_url, &services.api_gateway_url)
    }

    /// `POST /api/auth/login`.
    ///
    /// The user service answers rejected credentials with a JSON body as
    /// well, so the reply is decoded regardless of status.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let url = format!("{}/api/auth/login", self.user_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        debug!(%status, "Login reply received");

        match serde_json::from_str::<LoginResponse>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(AppError::authentication(non_empty_or(
                body,
                format!("Login failed with status {status}"),
            ))),
            Err(e) => Err(AppError::with_source(
                ErrorKind::ExternalService,
                "Invalid login response",
                e,
            )),
        }
    }

    /// `POST /api/auth/signup`. Returns the plain-text confirmation.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<String> {
        let url = format!("{}/api/auth/signup", self.user_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(AppError::authentication(non_empty_or(body, "Signup failed")))
        }
    }

    /// `GET /api/secure/user/current` on the API gateway.
    ///
    /// Returns an `Authentication` error when the gateway rejects the token
    /// and `ExternalService` for any other failure.
    pub async fn current_user(&self, token: &str) -> AppResult<UserProfile> {
        let url = format!("{}/api/secure/user/current", self.gateway_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        match status {
            s if s.is_success() => response.json::<UserProfile>().await.map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Invalid current user reply", e)
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AppError::authentication("Session is no longer valid"))
            }
            other => {
                warn!(status = %other, "Current user lookup failed");
                Err(AppError::external_service(format!(
                    "Current user lookup failed with status {other}"
                )))
            }
        }
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Network error: {err}"),
        err,
    )
}

fn non_empty_or(body: String, fallback: impl Into<String>) -> String {
    if body.trim().is_empty() {
        fallback.into()
    } else {
        body
    }
}
