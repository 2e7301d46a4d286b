//! Users and authentication repository for backend operations

use serde_json::json;

use crate::{
    error::AppResult,
    models::{LoginResponse, User, UserRequest},
};

use super::client::ApiClient;

#[derive(Clone, Debug)]
pub struct UsersRepository {
    client: ApiClient,
}

impl UsersRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticate and fetch the logged-in user record
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let response: LoginResponse = self
            .client
            .post("/auth/login", &json!({ "email": email, "senha": password }), None)
            .await?;

        if let Some(message) = &response.message {
            tracing::debug!("Login: {}", message);
        }
        Ok(response.user)
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.client.get("/usuarios").await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.client.get(&format!("/usuarios/{}", id)).await
    }

    pub async fn create(&self, user: &UserRequest) -> AppResult<User> {
        self.client.post("/usuarios", user, None).await
    }

    pub async fn update(&self, id: &str, user: &UserRequest) -> AppResult<User> {
        self.client.put(&format!("/usuarios/{}", id), Some(user), None).await
    }

    /// Activate or deactivate an account
    pub async fn set_status(&self, id: &str, active: bool) -> AppResult<User> {
        self.client
            .patch(&format!("/usuarios/{}/status", id), &json!({ "ativo": active }))
            .await
    }
}
