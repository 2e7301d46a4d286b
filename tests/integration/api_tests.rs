//! Backend integration tests
//!
//! These need a running Biblioteca Imperial backend with its seed data.

use biblioteca_imperial_client::{
    config::ApiConfig,
    repository::{Credentials, LibraryBackend, Repository},
    AppError,
};

const ADMIN_EMAIL: &str = "admin@biblioimp.org";
const ADMIN_PASSWORD: &str = "admin123";

fn api_config() -> ApiConfig {
    ApiConfig {
        base_url: std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
        timeout_secs: 10,
    }
}

fn authenticated() -> Repository {
    Repository::connect(
        &api_config(),
        Some(Credentials {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
    )
    .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_login() {
    let repository = authenticated();

    let user = repository
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Login failed");

    assert_eq!(user.email, ADMIN_EMAIL);
    assert!(!user.id.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let repository = Repository::connect(&api_config(), None).expect("Failed to build client");

    let err = repository.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::Authentication(_) | AppError::Backend { .. }));
}

#[tokio::test]
#[ignore]
async fn test_list_works() {
    let works = authenticated().list_works().await.expect("Failed to list works");

    for work in &works {
        assert!(!work.id.is_empty());
        assert!(!work.title.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_user_loans() {
    let repository = authenticated();
    let user = repository
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Login failed");

    let loans = repository.user_loans(&user.id).await.expect("Failed to list loans");
    for loan in &loans {
        assert!(loan.renewal_count <= biblioteca_imperial_client::models::MAX_RENEWALS);
    }
}

#[tokio::test]
#[ignore]
async fn test_unknown_work_is_not_found() {
    let err = authenticated().get_work("OBR-99999").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_) | AppError::Backend { .. }));
}

#[tokio::test]
#[ignore]
async fn test_search_works_by_title() {
    let repository = authenticated();
    let works = repository.list_works().await.expect("Failed to list works");
    let Some(first) = works.first() else {
        return;
    };

    let found = repository
        .search_works(&first.title)
        .await
        .expect("Failed to search works");
    assert!(found.iter().any(|w| w.id == first.id));
}

#[tokio::test]
#[ignore]
async fn test_list_authors_and_categories() {
    let repository = authenticated();

    let categories = repository.list_categories().await.expect("Failed to list categories");
    for category in &categories {
        assert!(!category.id.is_empty());
    }

    repository.list_authors().await.expect("Failed to list authors");
}
