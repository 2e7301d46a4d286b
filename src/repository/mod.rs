//! Repository layer over the Biblioteca Imperial REST backend

pub mod authors;
pub mod categories;
pub mod client;
pub mod loans;
pub mod users;
pub mod works;

use async_trait::async_trait;

use crate::{
    config::ApiConfig,
    error::AppResult,
    models::{
        Author, AuthorRequest, BorrowRequest, Category, CategoryRequest, CopyAvailability, Loan, User, UserRequest,
        Work, WorkRequest,
    },
};

pub use client::{ApiClient, Credentials};

/// Backend operations used by the services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;
    async fn list_users(&self) -> AppResult<Vec<User>>;
    async fn get_user(&self, user_id: &str) -> AppResult<User>;
    async fn create_user(&self, user: &UserRequest) -> AppResult<User>;
    async fn update_user(&self, user_id: &str, user: &UserRequest) -> AppResult<User>;
    async fn set_user_status(&self, user_id: &str, active: bool) -> AppResult<User>;
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn create_author(&self, author: &AuthorRequest) -> AppResult<Author>;
    async fn update_author(&self, author_id: &str, author: &AuthorRequest) -> AppResult<Author>;
    async fn delete_author(&self, author_id: &str) -> AppResult<()>;
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn create_category(&self, category: &CategoryRequest) -> AppResult<Category>;
    async fn update_category(&self, category_id: &str, category: &CategoryRequest) -> AppResult<Category>;
    async fn delete_category(&self, category_id: &str) -> AppResult<()>;
    async fn list_works(&self) -> AppResult<Vec<Work>>;
    async fn search_works(&self, title: &str) -> AppResult<Vec<Work>>;
    async fn get_work(&self, work_id: &str) -> AppResult<Work>;
    async fn create_work(&self, work: &WorkRequest) -> AppResult<Work>;
    async fn update_work(&self, work_id: &str, work: &WorkRequest) -> AppResult<Work>;
    async fn delete_work(&self, work_id: &str) -> AppResult<()>;
    async fn available_copies(&self, work_id: &str) -> AppResult<Vec<CopyAvailability>>;
    async fn user_loans(&self, user_id: &str) -> AppResult<Vec<Loan>>;
    async fn borrow(&self, request: &BorrowRequest) -> AppResult<Loan>;
    async fn renew(&self, loan_id: &str, days: u32) -> AppResult<Loan>;
    async fn return_loan(&self, loan_id: &str) -> AppResult<Loan>;
}

/// Main repository struct holding the backend client
#[derive(Clone, Debug)]
pub struct Repository {
    pub client: ApiClient,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
    pub works: works::WorksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given client
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: users::UsersRepository::new(client.clone()),
            authors: authors::AuthorsRepository::new(client.clone()),
            categories: categories::CategoriesRepository::new(client.clone()),
            works: works::WorksRepository::new(client.clone()),
            loans: loans::LoansRepository::new(client.clone()),
            client,
        }
    }

    pub fn connect(config: &ApiConfig, credentials: Option<Credentials>) -> AppResult<Self> {
        let client = ApiClient::new(config)?;
        let client = match credentials {
            Some(credentials) => client.with_credentials(credentials),
            None => client,
        };
        Ok(Self::new(client))
    }
}

#[async_trait]
impl LibraryBackend for Repository {
    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        self.users.login(email, password).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.users.get_by_id(user_id).await
    }

    async fn create_user(&self, user: &UserRequest) -> AppResult<User> {
        self.users.create(user).await
    }

    async fn update_user(&self, user_id: &str, user: &UserRequest) -> AppResult<User> {
        self.users.update(user_id, user).await
    }

    async fn set_user_status(&self, user_id: &str, active: bool) -> AppResult<User> {
        self.users.set_status(user_id, active).await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn create_author(&self, author: &AuthorRequest) -> AppResult<Author> {
        self.authors.create(author).await
    }

    async fn update_author(&self, author_id: &str, author: &AuthorRequest) -> AppResult<Author> {
        self.authors.update(author_id, author).await
    }

    async fn delete_author(&self, author_id: &str) -> AppResult<()> {
        self.authors.delete(author_id).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list().await
    }

    async fn create_category(&self, category: &CategoryRequest) -> AppResult<Category> {
        self.categories.create(category).await
    }

    async fn update_category(&self, category_id: &str, category: &CategoryRequest) -> AppResult<Category> {
        self.categories.update(category_id, category).await
    }

    async fn delete_category(&self, category_id: &str) -> AppResult<()> {
        self.categories.delete(category_id).await
    }

    async fn list_works(&self) -> AppResult<Vec<Work>> {
        self.works.list().await
    }

    async fn search_works(&self, title: &str) -> AppResult<Vec<Work>> {
        self.works.search_by_title(title).await
    }

    async fn get_work(&self, work_id: &str) -> AppResult<Work> {
        self.works.get_by_id(work_id).await
    }

    async fn create_work(&self, work: &WorkRequest) -> AppResult<Work> {
        self.works.create(work).await
    }

    async fn update_work(&self, work_id: &str, work: &WorkRequest) -> AppResult<Work> {
        self.works.update(work_id, work).await
    }

    async fn delete_work(&self, work_id: &str) -> AppResult<()> {
        self.works.delete(work_id).await
    }

    async fn available_copies(&self, work_id: &str) -> AppResult<Vec<CopyAvailability>> {
        self.loans.available_copies(work_id).await
    }

    async fn user_loans(&self, user_id: &str) -> AppResult<Vec<Loan>> {
        self.loans.get_user_loans(user_id).await
    }

    async fn borrow(&self, request: &BorrowRequest) -> AppResult<Loan> {
        self.loans.create(request).await
    }

    async fn renew(&self, loan_id: &str, days: u32) -> AppResult<Loan> {
        self.loans.renew(loan_id, days).await
    }

    async fn return_loan(&self, loan_id: &str) -> AppResult<Loan> {
        self.loans.return_loan(loan_id).await
    }
}
