//! Loan workflows: advisory pre-check, then the authoritative backend call

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRequest, Loan, User},
    policy::{classify_loan, total_unpaid_fines, EffectiveStatus, LoanActionGateway, LoanClassification},
    repository::LibraryBackend,
};

/// A loan together with its classification at a given instant
#[derive(Debug, Clone, Serialize)]
pub struct LoanEntry {
    pub loan: Loan,
    pub classification: LoanClassification,
}

/// Counters shown above the loan list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub active: usize,
    pub overdue: usize,
    pub unpaid_fines: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoanDashboard {
    /// Open loans only, soonest due first
    pub entries: Vec<LoanEntry>,
    pub summary: LoanSummary,
}

/// Count active and overdue loans from recomputed state, and total fines
pub fn summarize_loans(loans: &[Loan], now: DateTime<Utc>) -> LoanSummary {
    let (active, overdue) = loans
        .iter()
        .map(|loan| classify_loan(loan, now).effective_status)
        .fold((0, 0), |(active, overdue), status| match status {
            EffectiveStatus::Active => (active + 1, overdue),
            EffectiveStatus::Overdue => (active, overdue + 1),
            _ => (active, overdue),
        });

    LoanSummary {
        active,
        overdue,
        unpaid_fines: total_unpaid_fines(loans),
    }
}

#[derive(Clone)]
pub struct LoansService {
    backend: Arc<dyn LibraryBackend>,
    gateway: LoanActionGateway,
}

impl LoansService {
    pub fn new(backend: Arc<dyn LibraryBackend>, gateway: LoanActionGateway) -> Self {
        Self { backend, gateway }
    }

    pub fn gateway(&self) -> &LoanActionGateway {
        &self.gateway
    }

    /// Open loans of a user with their classification, plus summary counters
    pub async fn dashboard(&self, user: &User, now: DateTime<Utc>) -> AppResult<LoanDashboard> {
        let loans = self.backend.user_loans(&user.id).await?;
        let summary = summarize_loans(&loans, now);

        let mut entries: Vec<LoanEntry> = loans
            .into_iter()
            .map(|loan| {
                let classification = classify_loan(&loan, now);
                LoanEntry { loan, classification }
            })
            .filter(|entry| entry.classification.effective_status.is_open())
            .collect();

        // Unreadable due dates sort last
        entries.sort_by_key(|entry| entry.classification.days_remaining.unwrap_or(i64::MAX));

        Ok(LoanDashboard { entries, summary })
    }

    /// Borrow any available copy of a work
    pub async fn borrow(&self, user: &User, work_id: &str, now: DateTime<Utc>) -> AppResult<Loan> {
        let loans = self.backend.user_loans(&user.id).await?;
        let copies = self.backend.available_copies(work_id).await?;

        let copy_id = self.gateway.pre_borrow(user, &loans, &copies, now)?;

        let request = BorrowRequest {
            id_exemplar: copy_id,
            id_usuario: user.id.clone(),
            dias_emprestimo: self.gateway.rules().default_loan_days,
        };
        let loan = self.backend.borrow(&request).await?;

        tracing::info!(
            "Loan {} created for user {} (copy {})",
            loan.id,
            user.id,
            request.id_exemplar
        );
        Ok(loan)
    }

    /// Renew one of the user's loans by the default renewal period
    pub async fn renew(&self, user: &User, loan_id: &str, now: DateTime<Utc>) -> AppResult<Loan> {
        let loan = self.find_loan(user, loan_id).await?;
        self.gateway.pre_renew(&loan, now)?;

        let renewed = self
            .backend
            .renew(&loan.id, self.gateway.rules().default_renewal_days)
            .await?;

        tracing::info!(
            "Loan {} renewed ({} renewals)",
            renewed.id,
            renewed.renewal_count
        );
        Ok(renewed)
    }

    /// Return one of the user's loans
    pub async fn return_loan(&self, user: &User, loan_id: &str) -> AppResult<Loan> {
        let loan = self.find_loan(user, loan_id).await?;
        self.gateway.pre_return(&loan)?;

        let returned = self.backend.return_loan(&loan.id).await?;
        tracing::info!("Loan {} returned", returned.id);
        Ok(returned)
    }

    async fn find_loan(&self, user: &User, loan_id: &str) -> AppResult<Loan> {
        self.backend
            .user_loans(&user.id)
            .await?
            .into_iter()
            .find(|loan| loan.id == loan_id)
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found for user {}", loan_id, user.id)))
    }
}
