//! Endpoint functions, one per resource action.
//!
//! Anonymous endpoints go through [`ApiClient::fetch`](crate::ApiClient::fetch);
//! authenticated ones attach the stored access token and go through
//! [`ApiClient::fetch_with_refresh`](crate::ApiClient::fetch_with_refresh).

mod auth;
mod ingredients;
mod orders;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const USER_PATH: &str = "/auth/user";
pub const FORGOT_PASSWORD_PATH: &str = "/password-reset";
pub const RESET_PASSWORD_PATH: &str = "/password-reset/reset";
pub const INGREDIENTS_PATH: &str = "/ingredients";
pub const ORDERS_PATH: &str = "/orders";
pub const FEEDS_PATH: &str = "/orders/all";
