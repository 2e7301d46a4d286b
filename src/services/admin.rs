//! Admin console: users, authors and categories (access level 3 and above)

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorRequest, Category, CategoryRequest, User, UserRequest},
    policy::access,
    repository::LibraryBackend,
};

#[derive(Clone)]
pub struct AdminService {
    backend: Arc<dyn LibraryBackend>,
}

impl AdminService {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        Self { backend }
    }

    pub async fn list_users(&self, actor: &User) -> AppResult<Vec<User>> {
        require_admin_area(actor)?;
        self.backend.list_users().await
    }

    pub async fn get_user(&self, actor: &User, user_id: &str) -> AppResult<User> {
        require_admin_area(actor)?;
        self.backend.get_user(user_id).await
    }

    pub async fn create_user(&self, actor: &User, request: UserRequest) -> AppResult<User> {
        require_admin_area(actor)?;
        request.validate()?;

        let user = self.backend.create_user(&request).await?;
        tracing::info!("User {} created by {}", user.id, actor.id);
        Ok(user)
    }

    pub async fn update_user(&self, actor: &User, user_id: &str, request: UserRequest) -> AppResult<User> {
        require_admin_area(actor)?;
        request.validate()?;

        let user = self.backend.update_user(user_id, &request).await?;
        tracing::info!("User {} updated by {}", user.id, actor.id);
        Ok(user)
    }

    /// Activate or deactivate an account
    pub async fn set_user_status(&self, actor: &User, user_id: &str, active: bool) -> AppResult<User> {
        require_admin_area(actor)?;

        let user = self.backend.set_user_status(user_id, active).await?;
        tracing::info!(
            "User {} {} by {}",
            user.id,
            if active { "activated" } else { "deactivated" },
            actor.id
        );
        Ok(user)
    }

    pub async fn list_authors(&self, actor: &User) -> AppResult<Vec<Author>> {
        require_admin_area(actor)?;
        self.backend.list_authors().await
    }

    pub async fn create_author(&self, actor: &User, request: AuthorRequest) -> AppResult<Author> {
        require_admin_area(actor)?;
        request.validate()?;
        self.backend.create_author(&request).await
    }

    pub async fn update_author(&self, actor: &User, author_id: &str, request: AuthorRequest) -> AppResult<Author> {
        require_admin_area(actor)?;
        request.validate()?;
        self.backend.update_author(author_id, &request).await
    }

    pub async fn delete_author(&self, actor: &User, author_id: &str) -> AppResult<()> {
        require_admin_area(actor)?;
        self.backend.delete_author(author_id).await?;
        tracing::info!("Author {} deleted by {}", author_id, actor.id);
        Ok(())
    }

    pub async fn list_categories(&self, actor: &User) -> AppResult<Vec<Category>> {
        require_admin_area(actor)?;
        self.backend.list_categories().await
    }

    pub async fn create_category(&self, actor: &User, request: CategoryRequest) -> AppResult<Category> {
        require_admin_area(actor)?;
        request.validate()?;
        self.backend.create_category(&request).await
    }

    pub async fn update_category(
        &self,
        actor: &User,
        category_id: &str,
        request: CategoryRequest,
    ) -> AppResult<Category> {
        require_admin_area(actor)?;
        request.validate()?;
        self.backend.update_category(category_id, &request).await
    }

    /// The backend refuses while works still use the category
    pub async fn delete_category(&self, actor: &User, category_id: &str) -> AppResult<()> {
        require_admin_area(actor)?;
        self.backend.delete_category(category_id).await?;
        tracing::info!("Category {} deleted by {}", category_id, actor.id);
        Ok(())
    }
}

fn require_admin_area(actor: &User) -> AppResult<()> {
    if access::can_manage_admin_area(actor.effective_access_level()) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Admin area requires access level 3".to_string(),
        ))
    }
}
