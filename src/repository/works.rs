//! Works (catalog) repository for backend operations

use crate::{
    error::AppResult,
    models::{Work, WorkRequest},
};

use super::client::ApiClient;

#[derive(Clone, Debug)]
pub struct WorksRepository {
    client: ApiClient,
}

impl WorksRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Work>> {
        self.client.get("/obras").await
    }

    /// Title search, `GET /obras/buscar?titulo=`
    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Work>> {
        self.client
            .get_with_query("/obras/buscar", &[("titulo", title)])
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Work> {
        self.client.get(&format!("/obras/{}", id)).await
    }

    pub async fn create(&self, work: &WorkRequest) -> AppResult<Work> {
        self.client.post("/obras", work, None).await
    }

    pub async fn update(&self, id: &str, work: &WorkRequest) -> AppResult<Work> {
        self.client.put(&format!("/obras/{}", id), Some(work), None).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&format!("/obras/{}", id)).await
    }
}
