//! Catalog browsing and work management

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{User, Work, WorkRequest},
    policy::access,
    repository::LibraryBackend,
};

#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn LibraryBackend>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self { backend }
    }

    pub async fn list_works(&self) -> AppResult<Vec<Work>> {
        self.backend.list_works().await
    }

    /// Works whose title contains `title`
    pub async fn search_works(&self, title: &str) -> AppResult<Vec<Work>> {
        let title = title.trim();
        if title.is_empty() {
            return self.backend.list_works().await;
        }
        self.backend.search_works(title).await
    }

    pub async fn get_work(&self, work_id: &str) -> AppResult<Work> {
        self.backend.get_work(work_id).await
    }

    /// Create a work (level 4 and above)
    pub async fn create_work(&self, actor: &User, request: WorkRequest) -> AppResult<Work> {
        require_catalog_management(actor)?;
        request.validate()?;

        let work = self.backend.create_work(&request).await?;
        tracing::info!("Work {} created by {}", work.id, actor.id);
        Ok(work)
    }

    /// Update a work (level 4 and above)
    pub async fn update_work(&self, actor: &User, work_id: &str, request: WorkRequest) -> AppResult<Work> {
        require_catalog_management(actor)?;
        request.validate()?;

        let work = self.backend.update_work(work_id, &request).await?;
        tracing::info!("Work {} updated by {}", work.id, actor.id);
        Ok(work)
    }

    /// Remove a work from the catalog (level 4 and above)
    pub async fn delete_work(&self, actor: &User, work_id: &str) -> AppResult<()> {
        require_catalog_management(actor)?;

        self.backend.delete_work(work_id).await?;
        tracing::info!("Work {} deleted by {}", work_id, actor.id);
        Ok(())
    }
}

fn require_catalog_management(actor: &User) -> AppResult<()> {
    if access::can_manage_catalog_entities(actor.effective_access_level()) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Managing works requires access level 4".to_string(),
        ))
    }
}
