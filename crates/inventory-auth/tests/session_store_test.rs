//! Integration tests for the session store against a fake backend.

mod helpers;

use std::sync::Arc;

use inventory_auth::storage::FileSessionStorage;
use inventory_auth::{AuthClient, SessionStore};
use inventory_core::config::SessionConfig;
use inventory_core::error::ErrorKind;
use inventory_entity::auth::SignupRequest;
use inventory_entity::user::UserRole;

use helpers::{FakeBackend, GOOD_TOKEN};

#[tokio::test]
async fn test_login_round_trip_and_logout() {
    let backend = FakeBackend::start().await;
    let store = backend.store();

    let session = store.login("morgan", "secret").await.unwrap();
    assert_eq!(session.token, GOOD_TOKEN);
    assert_eq!(session.role(), UserRole::Manager);

    assert_eq!(store.get_token().await.unwrap().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(store.get_user().await.unwrap(), Some(session.user.clone()));
    assert!(store.is_authenticated().await);
    assert_eq!(
        store.auth_header().await.get("authorization").unwrap(),
        &format!("Bearer {GOOD_TOKEN}")
    );

    store.logout().await.unwrap();
    assert!(!store.is_authenticated().await);
    assert!(store.get_token().await.unwrap().is_none());
    assert!(store.get_user().await.unwrap().is_none());
    assert!(store.auth_header().await.is_empty());
}

#[tokio::test]
async fn test_rejected_login_surfaces_server_message() {
    let backend = FakeBackend::start().await;
    let store = backend.store();

    let err = store.login("morgan", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid username or password");
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_success_without_user_persists_nothing() {
    let backend = FakeBackend::start().await;
    let store = backend.store();

    let err = store.login("halfway", "x").await.unwrap_err();
    assert!(err.is_authentication());
    assert!(store.get_token().await.unwrap().is_none());
    assert!(store.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_credentials_never_reach_the_backend() {
    let backend = FakeBackend::start().await;
    let store = backend.store();

    let err = store.login("", "secret").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    let client = AuthClient::new(reqwest::Client::new(), "http://127.0.0.1:1", "http://127.0.0.1:1");
    let store = SessionStore::new(
        Arc::new(inventory_auth::MemorySessionStorage::new()),
        client,
        &SessionConfig::default(),
    );

    let err = store.login("morgan", "secret").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert!(err.message.starts_with("Network error"));
}

#[tokio::test]
async fn test_session_survives_restart_with_file_storage() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = backend.store_with(Arc::new(FileSessionStorage::new(&path)));
    first.login("morgan", "secret").await.unwrap();

    let second = backend.store_with(Arc::new(FileSessionStorage::new(&path)));
    let session = second.get_session().await.unwrap().unwrap();
    assert_eq!(session.token, GOOD_TOKEN);
    assert_eq!(session.user.full_name, "Morgan Lee");
    assert!(second.has_role("MANAGER").await);
    assert!(second.can_access_supplier_service().await);
}

#[tokio::test]
async fn test_verify_refreshes_profile() {
    let backend = FakeBackend::start().await;
    let store = backend.store();
    store.login("morgan", "secret").await.unwrap();

    let session = store.verify().await.unwrap().unwrap();
    assert_eq!(session.user.full_name, "Morgan Lee-Refreshed");
    assert_eq!(
        store.get_user().await.unwrap().unwrap().full_name,
        "Morgan Lee-Refreshed"
    );
}

#[tokio::test]
async fn test_verify_rejection_clears_session() {
    let backend = FakeBackend::start().await;
    let store = backend.store();
    store.login("stale", "secret").await.unwrap();
    assert!(store.is_authenticated().await);

    assert!(store.verify().await.unwrap().is_none());
    assert!(!store.is_authenticated().await);
    assert!(store.get_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_signup() {
    let backend = FakeBackend::start().await;
    let store = backend.store();

    let mut request = SignupRequest {
        username: "newbie".into(),
        password: "longenough".into(),
        email: "newbie@example.com".into(),
        full_name: "New Bie".into(),
        phone_number: None,
        date_of_birth: None,
    };
    assert_eq!(
        store.signup(&request).await.unwrap(),
        "User registered successfully"
    );

    request.username = "taken".into();
    let err = store.signup(&request).await.unwrap_err();
    assert_eq!(err.message, "Username already exists");
}
