//! HTTP client for the Biblioteca Imperial REST backend

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult, LoanAction},
};

/// HTTP Basic credentials (email and password)
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Error body sent by the backend, either `{"mensagem": ..}` or `{"error": ..}`
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    mensagem: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match &self.credentials {
            Some(c) => builder.basic_auth(&c.email, Some(&c.password)),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        self.send(self.request(Method::GET, endpoint), None).await
    }

    pub async fn get_with_query<Q, T>(&self, endpoint: &str, query: &Q) -> AppResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, endpoint).query(query), None).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B, action: Option<LoanAction>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, endpoint).json(body), action).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: Option<&B>, action: Option<LoanAction>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, endpoint);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(builder, action).await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, endpoint).json(body), None).await
    }

    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        self.send(self.request(Method::DELETE, endpoint), None).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, action: Option<LoanAction>) -> AppResult<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .mensagem
                .or(body.error)
                .unwrap_or_else(|| format!("Erro HTTP: {}", status.as_u16()));
            tracing::warn!("Backend rejected request ({}): {}", status, message);
            return Err(rejection(status, message, action));
        }

        let bytes = response.bytes().await?;
        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn rejection(status: StatusCode, message: String, action: Option<LoanAction>) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Authentication(message),
        StatusCode::FORBIDDEN => AppError::Authorization(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => match action {
            Some(action) => AppError::from_rejection(action, status.as_u16(), message),
            None => AppError::Backend {
                status: status.as_u16(),
                message,
            },
        },
    }
}
