//! Loans repository for backend operations

use crate::{
    error::{AppResult, LoanAction},
    models::{BorrowRequest, CopyAvailability, Loan},
};

use super::client::ApiClient;

#[derive(Clone, Debug)]
pub struct LoansRepository {
    client: ApiClient,
}

impl LoansRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get all loans of a user, open and closed
    pub async fn get_user_loans(&self, user_id: &str) -> AppResult<Vec<Loan>> {
        self.client
            .get(&format!("/emprestimos/usuario/{}", user_id))
            .await
    }

    /// Copies of a work currently available for borrowing
    pub async fn available_copies(&self, work_id: &str) -> AppResult<Vec<CopyAvailability>> {
        self.client
            .get(&format!("/exemplares/obra/{}/disponiveis", work_id))
            .await
    }

    /// Create a new loan
    pub async fn create(&self, request: &BorrowRequest) -> AppResult<Loan> {
        self.client
            .post("/emprestimos/realizar", request, Some(LoanAction::Borrow))
            .await
    }

    /// Renew a loan by `days`
    pub async fn renew(&self, loan_id: &str, days: u32) -> AppResult<Loan> {
        self.client
            .put::<(), _>(
                &format!("/emprestimos/{}/renovar?diasRenovacao={}", loan_id, days),
                None,
                Some(LoanAction::Renew),
            )
            .await
    }

    /// Return a loan
    pub async fn return_loan(&self, loan_id: &str) -> AppResult<Loan> {
        self.client
            .put::<(), _>(
                &format!("/emprestimos/{}/devolver", loan_id),
                None,
                Some(LoanAction::Return),
            )
            .await
    }
}
