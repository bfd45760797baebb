//! End-to-end session flow over a fake server.

use std::sync::Arc;

use async_trait::async_trait;
use burger_api::models::{CredentialPair, LoginData};
use burger_api::session::{FileStorage, SessionStore};
use burger_api::{
    ApiClient, ApiConfig, ApiError, ApiRequest, Endpoint, RequestState, Transport,
    TransportResponse,
};
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::{Value, json};

/// Minimal stand-in for the real service: issues numbered tokens and rejects
/// every token but the latest as expired.
#[derive(Default)]
struct FakeServer {
    state: Mutex<ServerState>,
}

#[derive(Default)]
struct ServerState {
    issued: u32,
    refresh_calls: u32,
    logged_out: bool,
}

impl FakeServer {
    fn issue(state: &mut ServerState) -> Value {
        state.issued += 1;
        json!({
            "success": true,
            "accessToken": format!("Bearer access-{}", state.issued),
            "refreshToken": format!("refresh-{}", state.issued),
            "user": { "name": "John Doe", "email": "johndoe@example.com" }
        })
    }

    fn expire_current(&self) {
        // Pretend the server rotated its signing key: the latest access token is stale.
        self.state.lock().issued += 1;
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, ApiError> {
        // Give concurrent requests a chance to interleave.
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        let path = request.url.trim_start_matches("https://burgers.test/api");
        let current_access = format!("Bearer access-{}", state.issued);

        let body = match path {
            "/auth/login" => Self::issue(&mut state),
            "/auth/token" => {
                state.refresh_calls += 1;
                let expected = format!("refresh-{}", state.issued.saturating_sub(1));
                let sent = request.body.as_ref().and_then(|b| b["token"].as_str());
                if sent == Some(expected.as_str()) {
                    Self::issue(&mut state)
                } else {
                    return Ok(TransportResponse::json(
                        StatusCode::UNAUTHORIZED,
                        &json!({ "success": false, "message": "Token is invalid" }),
                    ));
                }
            }
            "/auth/user" => {
                if request.authorization() != Some(current_access.as_str()) {
                    return Ok(TransportResponse::json(
                        StatusCode::FORBIDDEN,
                        &json!({ "success": false, "message": "jwt expired" }),
                    ));
                }
                json!({ "success": true, "user": { "name": "John Doe", "email": "johndoe@example.com" } })
            }
            "/auth/logout" => {
                state.logged_out = true;
                json!({ "success": true, "message": "Successful logout" })
            }
            _ => {
                return Ok(TransportResponse::json(
                    StatusCode::NOT_FOUND,
                    &json!({ "success": false }),
                ));
            }
        };

        Ok(TransportResponse::json(StatusCode::OK, &body))
    }
}

fn client(server: Arc<FakeServer>, session: Arc<SessionStore>) -> ApiClient {
    let config = ApiConfig::new("https://burgers.test/api").unwrap();
    ApiClient::with_transport(config, server, session)
}

#[tokio::test]
async fn test_login_expire_refresh_logout() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path().join("storage.json")).unwrap());
    let session = Arc::new(SessionStore::new(storage));
    let server = Arc::new(FakeServer::default());
    let client = client(Arc::clone(&server), Arc::clone(&session));

    client
        .login_user(&LoginData {
            email: "johndoe@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        session.credentials(),
        Some(CredentialPair {
            access_token: "Bearer access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        })
    );

    server.expire_current();
    let user = client.get_user().await.unwrap();
    assert_eq!(user.user.name, "John Doe");
    assert_eq!(server.state.lock().refresh_calls, 1);
    assert_eq!(session.get_access().as_deref(), Some("Bearer access-3"));

    // The refresh token was written through to disk.
    let reopened = FileStorage::open(dir.path().join("storage.json")).unwrap();
    assert_eq!(
        burger_api::session::DurableStore::get_item(&reopened, "refreshToken").as_deref(),
        Some("refresh-3")
    );

    let state = RequestState::settle(Endpoint::Logout, client.logout().await);
    assert!(matches!(state, RequestState::Fulfilled(_)));
    assert!(server.state.lock().logged_out);
    assert_eq!(session.credentials(), None);
}

#[tokio::test]
async fn test_concurrent_expiry_refreshes_once() {
    let session = Arc::new(SessionStore::in_memory());
    let server = Arc::new(FakeServer::default());
    let client = client(Arc::clone(&server), Arc::clone(&session));

    client
        .login_user(&LoginData {
            email: "johndoe@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    server.expire_current();

    let (first, second) = tokio::join!(client.get_user(), client.get_user());

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(server.state.lock().refresh_calls, 1);
}

#[tokio::test]
async fn test_invalid_refresh_surfaces_refresh_failure() {
    let session = Arc::new(SessionStore::in_memory());
    let server = Arc::new(FakeServer::default());
    let client = client(Arc::clone(&server), Arc::clone(&session));

    session.set_access("Bearer stale", Default::default());
    session.set_refresh("not-a-real-token");

    let state = RequestState::settle(Endpoint::GetUser, client.get_user().await);

    assert_eq!(state, RequestState::Rejected("Token is invalid".to_string()));
    assert_eq!(server.state.lock().refresh_calls, 1);
}
