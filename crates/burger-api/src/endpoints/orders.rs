use serde_json::json;
use tracing::{info, instrument};

use super::{FEEDS_PATH, ORDERS_PATH};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{FeedsResponse, NewOrderResponse, Order, OrderResponse};
use crate::transport::ApiRequest;

impl ApiClient {
    /// Public feed of recent orders.
    pub async fn get_feeds(&self) -> Result<FeedsResponse, ApiError> {
        let request = ApiRequest::get(self.url(FEEDS_PATH));
        self.fetch(request).await
    }

    /// Orders of the signed-in user.
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        let request =
            self.authorized(ApiRequest::get(self.url(ORDERS_PATH)).with_json_content_type());
        let response: FeedsResponse = self.fetch_with_refresh(request).await?;
        Ok(response.orders)
    }

    /// Place an order for the given ingredient ids.
    #[instrument(skip_all, fields(ingredients = ingredients.len()))]
    pub async fn order_burger(&self, ingredients: &[String]) -> Result<NewOrderResponse, ApiError> {
        let request = self.authorized(
            ApiRequest::post(self.url(ORDERS_PATH)).with_json(json!({ "ingredients": ingredients })),
        );
        let response: NewOrderResponse = self.fetch_with_refresh(request).await?;
        info!(number = response.order.number, "Order placed");
        Ok(response)
    }

    pub async fn get_order_by_number(&self, number: u64) -> Result<OrderResponse, ApiError> {
        let request = ApiRequest::get(self.url(&format!("{ORDERS_PATH}/{number}")))
            .with_json_content_type();
        self.fetch(request).await
    }
}
