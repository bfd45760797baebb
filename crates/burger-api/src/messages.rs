//! User-facing failure messages.
//!
//! A consumer only ever shows a message string, never an error value. The
//! server's own message wins; otherwise each endpoint has its own default.

use crate::error::ApiError;

/// Shared default for data fetches.
pub const API_ERROR: &str = "API Error";

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Default for order endpoints ("an unknown error occurred").
pub const ORDER_UNKNOWN_ERROR: &str = "Произошла неизвестная ошибка";

/// Every endpoint function, for looking up its default message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Register,
    Login,
    Logout,
    GetUser,
    UpdateUser,
    ForgotPassword,
    ResetPassword,
    Ingredients,
    Feeds,
    UserOrders,
    OrderByNumber,
    CreateOrder,
}

impl Endpoint {
    pub const ALL: [Endpoint; 12] = [
        Self::Register,
        Self::Login,
        Self::Logout,
        Self::GetUser,
        Self::UpdateUser,
        Self::ForgotPassword,
        Self::ResetPassword,
        Self::Ingredients,
        Self::Feeds,
        Self::UserOrders,
        Self::OrderByNumber,
        Self::CreateOrder,
    ];

    pub fn default_message(self) -> &'static str {
        match self {
            Self::Register => UNKNOWN_ERROR,
            Self::Login => LOGIN_FAILED,
            Self::Logout => LOGOUT_FAILED,
            Self::GetUser
            | Self::UpdateUser
            | Self::ForgotPassword
            | Self::ResetPassword
            | Self::Ingredients
            | Self::Feeds => API_ERROR,
            Self::UserOrders | Self::OrderByNumber | Self::CreateOrder => ORDER_UNKNOWN_ERROR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::GetUser => "get_user",
            Self::UpdateUser => "update_user",
            Self::ForgotPassword => "forgot_password",
            Self::ResetPassword => "reset_password",
            Self::Ingredients => "ingredients",
            Self::Feeds => "feeds",
            Self::UserOrders => "user_orders",
            Self::OrderByNumber => "order_by_number",
            Self::CreateOrder => "create_order",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Message to show for a failed call to `endpoint`.
pub fn resolve_message(endpoint: Endpoint, error: &ApiError) -> String {
    error
        .server_message()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| endpoint.default_message())
        .to_string()
}
