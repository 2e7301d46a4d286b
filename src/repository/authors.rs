//! Authors repository for backend operations

use crate::{
    error::AppResult,
    models::{Author, AuthorRequest},
};

use super::client::ApiClient;

#[derive(Clone, Debug)]
pub struct AuthorsRepository {
    client: ApiClient,
}

impl AuthorsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.client.get("/autores").await
    }

    pub async fn create(&self, author: &AuthorRequest) -> AppResult<Author> {
        self.client.post("/autores", author, None).await
    }

    pub async fn update(&self, id: &str, author: &AuthorRequest) -> AppResult<Author> {
        self.client.put(&format!("/autores/{}", id), Some(author), None).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&format!("/autores/{}", id)).await
    }
}
