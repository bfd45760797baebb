//! Payload types for the ordering service.
//!
//! Field names follow the server's JSON; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued on login, registration and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub proteins: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub calories: f64,
    pub price: f64,
    pub image: String,
    pub image_mobile: String,
    pub image_large: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub number: u64,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IngredientsResponse {
    pub data: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedsResponse {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderResponse {
    pub order: Order,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn credentials(&self) -> CredentialPair {
        CredentialPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// Acknowledgement envelope for endpoints without a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

/// Partial profile update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingredient_uses_server_field_names() {
        let ingredient: Ingredient = serde_json::from_value(json!({
            "_id": "1",
            "name": "ingredient 1",
            "type": "bun",
            "proteins": 10,
            "fat": 5,
            "carbohydrates": 15,
            "calories": 100,
            "price": 50,
            "image": "url1",
            "image_mobile": "url1",
            "image_large": "url1",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(ingredient.id, "1");
        assert_eq!(ingredient.kind, "bun");
        assert_eq!(ingredient.price, 50.0);
    }

    #[test]
    fn test_feed_envelope() {
        let feed: FeedsResponse = serde_json::from_value(json!({
            "success": true,
            "orders": [{
                "_id": "o1",
                "status": "done",
                "name": "Space burger",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-01T00:00:01.000Z",
                "number": 42,
                "ingredients": ["1", "2"]
            }],
            "total": 100,
            "totalToday": 7
        }))
        .unwrap();

        assert_eq!(feed.total_today, 7);
        assert_eq!(feed.orders[0].number, 42);
    }

    #[test]
    fn test_update_user_skips_absent_fields() {
        let data = UpdateUserData {
            name: Some("John Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({ "name": "John Doe" }));
    }
}
