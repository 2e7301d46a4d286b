//! Biblioteca Imperial client
//!
//! Loan lifecycle and entitlement engine for the Biblioteca Imperial library
//! system, plus a typed client for its REST backend.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use policy::{classify_loan, total_unpaid_fines, LoanActionGateway, LoanClassification};

/// Application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
