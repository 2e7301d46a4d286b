//! Categories repository for backend operations

use crate::{
    error::AppResult,
    models::{Category, CategoryRequest},
};

use super::client::ApiClient;

#[derive(Clone, Debug)]
pub struct CategoriesRepository {
    client: ApiClient,
}

impl CategoriesRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.client.get("/categorias").await
    }

    pub async fn create(&self, category: &CategoryRequest) -> AppResult<Category> {
        self.client.post("/categorias", category, None).await
    }

    pub async fn update(&self, id: &str, category: &CategoryRequest) -> AppResult<Category> {
        self.client.put(&format!("/categorias/{}", id), Some(category), None).await
    }

    /// Fails while works are still linked to the category
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&format!("/categorias/{}", id)).await
    }
}
