//! Client workflows built on the policy engine and the backend

pub mod admin;
pub mod catalog;
pub mod loans;

use std::sync::Arc;

use crate::{
    policy::{LoanActionGateway, LoanRules},
    repository::LibraryBackend,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub backend: Arc<dyn LibraryBackend>,
    pub admin: admin::AdminService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services over the given backend
    pub fn new(backend: Arc<dyn LibraryBackend>, rules: LoanRules) -> Self {
        Self {
            admin: admin::AdminService::new(backend.clone()),
            catalog: catalog::CatalogService::new(backend.clone()),
            loans: loans::LoansService::new(backend.clone(), LoanActionGateway::new(rules)),
            backend,
        }
    }
}
