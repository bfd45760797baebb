use serde_json::json;
use tracing::{info, instrument};

use super::{
    FORGOT_PASSWORD_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH, RESET_PASSWORD_PATH, USER_PATH,
};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Acknowledgement, AuthResponse, LoginData, RegisterData, UpdateUserData, UserResponse,
};
use crate::transport::ApiRequest;

impl ApiClient {
    /// Create an account and start a session with the issued credentials.
    #[instrument(skip_all)]
    pub async fn register_user(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post(self.url(REGISTER_PATH)).with_json(json!(data));
        let response: AuthResponse = self.fetch(request).await?;
        self.session().store_pair(&response.credentials());
        info!("Registered new user");
        Ok(response)
    }

    /// Log in and start a session with the issued credentials.
    #[instrument(skip_all)]
    pub async fn login_user(&self, data: &LoginData) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post(self.url(LOGIN_PATH)).with_json(json!(data));
        let response: AuthResponse = self.fetch(request).await?;
        self.session().store_pair(&response.credentials());
        info!("Logged in");
        Ok(response)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        let request =
            ApiRequest::post(self.url(FORGOT_PASSWORD_PATH)).with_json(json!({ "email": email }));
        self.fetch(request).await
    }

    pub async fn reset_password(
        &self,
        password: &str,
        token: &str,
    ) -> Result<Acknowledgement, ApiError> {
        let request = ApiRequest::post(self.url(RESET_PASSWORD_PATH))
            .with_json(json!({ "password": password, "token": token }));
        self.fetch(request).await
    }

    pub async fn get_user(&self) -> Result<UserResponse, ApiError> {
        let request = self.authorized(ApiRequest::get(self.url(USER_PATH)).with_json_content_type());
        self.fetch_with_refresh(request).await
    }

    pub async fn update_user(&self, data: &UpdateUserData) -> Result<UserResponse, ApiError> {
        let request = self.authorized(ApiRequest::patch(self.url(USER_PATH)).with_json(json!(data)));
        self.fetch_with_refresh(request).await
    }

    /// End the session on the server, then drop both stored tokens.
    ///
    /// The stores are only cleared when the server confirms the logout.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        let token = self.session().get_refresh();
        let request = ApiRequest::post(self.url(LOGOUT_PATH)).with_json(json!({ "token": token }));

        let response: Acknowledgement = self.fetch(request).await?;

        self.session().clear();
        info!("Logged out");
        Ok(response)
    }
}
