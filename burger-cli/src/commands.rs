use burger_api::models::{AuthResponse, LoginData, RegisterData, UpdateUserData};
use burger_api::{ApiClient, ApiError, Endpoint, RequestState, lifecycle};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::Commands;

pub struct CommandExecutor {
    client: ApiClient,
}

impl CommandExecutor {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Run one subcommand to completion.
    ///
    /// Failures come back as `Rejected` carrying the message meant for the user.
    pub async fn execute(&self, command: Commands) -> RequestState<Value> {
        let client = &self.client;
        match command {
            Commands::Ingredients => {
                run(Endpoint::Ingredients, async {
                    to_json(client.get_ingredients().await)
                })
                .await
            }
            Commands::Feed => run(Endpoint::Feeds, async { to_json(client.get_feeds().await) }).await,
            Commands::Order { number } => {
                run(Endpoint::OrderByNumber, async {
                    to_json(client.get_order_by_number(number).await)
                })
                .await
            }
            Commands::Register {
                email,
                name,
                password,
            } => {
                let data = RegisterData {
                    email,
                    name,
                    password,
                };
                run(Endpoint::Register, async {
                    client.register_user(&data).await.map(signed_in)
                })
                .await
            }
            Commands::Login { email, password } => {
                let data = LoginData { email, password };
                run(Endpoint::Login, async {
                    client.login_user(&data).await.map(signed_in)
                })
                .await
            }
            Commands::Logout => run(Endpoint::Logout, async { to_json(client.logout().await) }).await,
            Commands::User => run(Endpoint::GetUser, async { to_json(client.get_user().await) }).await,
            Commands::UpdateUser {
                email,
                name,
                password,
            } => {
                let data = UpdateUserData {
                    email,
                    name,
                    password,
                };
                run(Endpoint::UpdateUser, async {
                    to_json(client.update_user(&data).await)
                })
                .await
            }
            Commands::Orders => {
                run(Endpoint::UserOrders, async { to_json(client.get_orders().await) }).await
            }
            Commands::CreateOrder { ingredients } => {
                run(Endpoint::CreateOrder, async {
                    to_json(client.order_burger(&ingredients).await)
                })
                .await
            }
            Commands::ForgotPassword { email } => {
                run(Endpoint::ForgotPassword, async {
                    to_json(client.forgot_password(&email).await)
                })
                .await
            }
            Commands::ResetPassword { password, token } => {
                run(Endpoint::ResetPassword, async {
                    to_json(client.reset_password(&password, &token).await)
                })
                .await
            }
            Commands::Session => {
                let session = client.session();
                RequestState::Fulfilled(json!({
                    "access": session.get_access().is_some(),
                    "refresh": session.get_refresh().is_some(),
                }))
            }
        }
    }
}

async fn run<F>(endpoint: Endpoint, future: F) -> RequestState<Value>
where
    F: Future<Output = Result<Value, ApiError>>,
{
    lifecycle::track(endpoint, future, |state| {
        if state.is_pending() {
            debug!(%endpoint, "Request pending");
        }
    })
    .await
}

fn to_json<T: Serialize>(result: Result<T, ApiError>) -> Result<Value, ApiError> {
    result.and_then(|value| serde_json::to_value(value).map_err(ApiError::from))
}

/// Sign-in output without the tokens, which stay in the session.
fn signed_in(response: AuthResponse) -> Value {
    json!({ "success": true, "user": response.user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use burger_api::{ApiConfig, ApiRequest, SessionStore, Transport, TransportResponse};
    use reqwest::StatusCode;

    /// Answers every request with the same response.
    struct FixedTransport {
        status: StatusCode,
        body: Value,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn send(&self, _request: ApiRequest) -> Result<TransportResponse, ApiError> {
            Ok(TransportResponse::json(self.status, &self.body))
        }
    }

    fn executor(status: StatusCode, body: Value) -> (CommandExecutor, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::in_memory());
        let client = ApiClient::with_transport(
            ApiConfig::default(),
            Arc::new(FixedTransport { status, body }),
            Arc::clone(&session),
        );
        (CommandExecutor::new(client), session)
    }

    #[tokio::test]
    async fn test_login_output_hides_tokens() {
        let (executor, session) = executor(
            StatusCode::OK,
            json!({
                "success": true,
                "accessToken": "Bearer access",
                "refreshToken": "refresh",
                "user": { "email": "johndoe@example.com", "name": "John Doe" }
            }),
        );

        let state = executor
            .execute(Commands::Login {
                email: "johndoe@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        let output = state.value().unwrap().to_string();
        assert!(!output.contains("refresh"));
        assert!(output.contains("John Doe"));
        assert_eq!(session.get_refresh().as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_failed_login_shows_default_message() {
        let (executor, _session) = executor(StatusCode::UNAUTHORIZED, json!({ "success": false }));

        let state = executor
            .execute(Commands::Login {
                email: "johndoe@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert_eq!(state.error(), Some("Login failed"));
    }

    #[tokio::test]
    async fn test_order_failure_shows_server_message() {
        let (executor, _session) = executor(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "message": "Ingredient ids must be provided" }),
        );

        let state = executor
            .execute(Commands::CreateOrder {
                ingredients: vec!["1".to_string()],
            })
            .await;

        assert_eq!(state.error(), Some("Ingredient ids must be provided"));
    }

    #[tokio::test]
    async fn test_session_reports_presence_only() {
        let (executor, session) = executor(StatusCode::OK, json!({ "success": true }));
        session.set_refresh("refresh");

        let state = executor.execute(Commands::Session).await;

        assert_eq!(
            state.value(),
            Some(&json!({ "access": false, "refresh": true }))
        );
    }
}
