use super::INGREDIENTS_PATH;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Ingredient, IngredientsResponse};
use crate::transport::ApiRequest;

impl ApiClient {
    /// Full ingredient catalogue.
    pub async fn get_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        let request = ApiRequest::get(self.url(INGREDIENTS_PATH));
        let response: IngredientsResponse = self.fetch(request).await?;
        Ok(response.data)
    }
}
