//! Advisory pre-checks run before loan requests reach the backend.
//!
//! Nothing here is a security boundary. The backend re-validates every
//! request and its answer wins, even when a pre-check passed: copies and
//! fines can change between the check and the request.

use chrono::{DateTime, Utc};

use crate::{
    config::LoansConfig,
    error::{BorrowError, IneligibilityReason, LoanActionError, NotRenewableReason, RenewError},
    models::{CopyAvailability, Loan, User, MAX_RENEWALS},
    policy::{
        access,
        fines::{has_unpaid_fines, total_unpaid_fines},
        loan_state::{classify_loan, EffectiveStatus},
    },
};

/// Loan rules communicated by the backend or configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanRules {
    /// Simultaneous open loans allowed per user; `None` leaves it to the backend
    pub max_simultaneous_loans: Option<u32>,
    pub default_loan_days: u32,
    pub default_renewal_days: u32,
}

impl Default for LoanRules {
    fn default() -> Self {
        Self {
            max_simultaneous_loans: None,
            default_loan_days: 14,
            default_renewal_days: 7,
        }
    }
}

impl From<&LoansConfig> for LoanRules {
    fn from(config: &LoansConfig) -> Self {
        Self {
            max_simultaneous_loans: config.max_simultaneous_loans,
            default_loan_days: config.default_loan_days,
            default_renewal_days: config.default_renewal_days,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoanActionGateway {
    rules: LoanRules,
}

impl LoanActionGateway {
    pub fn new(rules: LoanRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LoanRules {
        &self.rules
    }

    /// Check a borrow request and pick the copy to request.
    ///
    /// `loans` are the user's own loans; `copies` the availability list for
    /// the work. Returns the available copy with the lowest identifier.
    pub fn pre_borrow(
        &self,
        user: &User,
        loans: &[Loan],
        copies: &[CopyAvailability],
        now: DateTime<Utc>,
    ) -> Result<String, BorrowError> {
        let copy = copies
            .iter()
            .filter(|c| c.available)
            .min_by(|a, b| a.copy_id.cmp(&b.copy_id))
            .ok_or(BorrowError::NoCopyAvailable)?;

        if !user.active || !access::can_borrow(user.effective_access_level()) {
            return Err(BorrowError::UserIneligible(IneligibilityReason::InactiveUser));
        }

        if has_unpaid_fines(loans) {
            tracing::debug!(user_id = %user.id, unpaid = %total_unpaid_fines(loans), "Borrow blocked by unpaid fines");
            return Err(BorrowError::UserIneligible(IneligibilityReason::UnpaidFines));
        }

        if let Some(max) = self.rules.max_simultaneous_loans {
            let open = loans
                .iter()
                .filter(|loan| classify_loan(loan, now).effective_status.is_open())
                .count();
            if open >= max as usize {
                tracing::debug!(user_id = %user.id, open, max, "Borrow blocked by loan limit");
                return Err(BorrowError::UserIneligible(IneligibilityReason::LoanLimitReached));
            }
        }

        Ok(copy.copy_id.clone())
    }

    /// Check a renewal request
    pub fn pre_renew(&self, loan: &Loan, now: DateTime<Utc>) -> Result<(), RenewError> {
        let classification = classify_loan(loan, now);
        if classification.is_renewable {
            return Ok(());
        }

        let reason = match classification.effective_status {
            EffectiveStatus::Returned | EffectiveStatus::Cancelled => NotRenewableReason::Closed,
            EffectiveStatus::Overdue => NotRenewableReason::Overdue,
            _ if loan.renewal_count >= MAX_RENEWALS => NotRenewableReason::RenewalLimitReached,
            _ => NotRenewableReason::IndeterminateDueDate,
        };

        tracing::debug!(loan_id = %loan.id, %reason, "Renewal blocked");
        Err(RenewError::NotRenewable(reason))
    }

    /// Returns are never blocked client-side
    pub fn pre_return(&self, loan: &Loan) -> Result<(), LoanActionError> {
        tracing::debug!(loan_id = %loan.id, "Return deferred to backend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessLevel, Fine, LoanStatus};
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    fn patron() -> User {
        User {
            id: "USR-00010".to_string(),
            name: "Raphael".to_string(),
            email: "raphael@biblioimp.org".to_string(),
            access_level: AccessLevel::new(1),
            active: true,
            group: None,
        }
    }

    fn open_loan(id: &str) -> Loan {
        Loan::new(id, format!("EXE-{}", id), "USR-00010").with_due_date(now() + Duration::days(7))
    }

    fn copies() -> Vec<CopyAvailability> {
        vec![
            CopyAvailability::new("EXE-00009", "OBR-1", true),
            CopyAvailability::new("EXE-00003", "OBR-1", false),
            CopyAvailability::new("EXE-00005", "OBR-1", true),
        ]
    }

    fn gateway(max: Option<u32>) -> LoanActionGateway {
        LoanActionGateway::new(LoanRules {
            max_simultaneous_loans: max,
            ..Default::default()
        })
    }

    #[test]
    fn test_pre_borrow_no_copies() {
        assert_eq!(
            gateway(None).pre_borrow(&patron(), &[], &[], now()),
            Err(BorrowError::NoCopyAvailable)
        );

        let unavailable = vec![CopyAvailability::new("EXE-1", "OBR-1", false)];
        assert_eq!(
            gateway(None).pre_borrow(&patron(), &[], &unavailable, now()),
            Err(BorrowError::NoCopyAvailable)
        );
    }

    #[test]
    fn test_pre_borrow_picks_lowest_available_copy() {
        assert_eq!(
            gateway(Some(3)).pre_borrow(&patron(), &[], &copies(), now()),
            Ok("EXE-00005".to_string())
        );
    }

    #[test]
    fn test_pre_borrow_unpaid_fines() {
        let loans = vec![open_loan("1").with_fine(Fine::unpaid(dec!(2.00)))];
        assert_eq!(
            gateway(None).pre_borrow(&patron(), &loans, &copies(), now()),
            Err(BorrowError::UserIneligible(IneligibilityReason::UnpaidFines))
        );
    }

    #[test]
    fn test_pre_borrow_paid_fines_do_not_block() {
        let loans = vec![open_loan("1").with_fine(Fine::paid(dec!(2.00)))];
        assert!(gateway(None).pre_borrow(&patron(), &loans, &copies(), now()).is_ok());
    }

    #[test]
    fn test_pre_borrow_loan_limit() {
        let loans = vec![
            open_loan("1"),
            open_loan("2"),
            open_loan("3").with_status(LoanStatus::Returned),
        ];
        assert_eq!(
            gateway(Some(2)).pre_borrow(&patron(), &loans, &copies(), now()),
            Err(BorrowError::UserIneligible(IneligibilityReason::LoanLimitReached))
        );
        assert!(gateway(Some(3)).pre_borrow(&patron(), &loans, &copies(), now()).is_ok());
        assert!(gateway(None).pre_borrow(&patron(), &loans, &copies(), now()).is_ok());
    }

    #[test]
    fn test_pre_borrow_inactive_user() {
        let mut user = patron();
        user.active = false;
        assert_eq!(
            gateway(None).pre_borrow(&user, &[], &copies(), now()),
            Err(BorrowError::UserIneligible(IneligibilityReason::InactiveUser))
        );
    }

    #[test]
    fn test_pre_renew_reasons() {
        let gw = gateway(None);

        let limit = open_loan("1").with_renewals(3);
        assert_eq!(
            gw.pre_renew(&limit, now()),
            Err(RenewError::NotRenewable(NotRenewableReason::RenewalLimitReached))
        );

        let overdue = Loan::new("2", "EXE-2", "USR-00010").with_due_date(now() - Duration::days(1));
        assert_eq!(
            gw.pre_renew(&overdue, now()),
            Err(RenewError::NotRenewable(NotRenewableReason::Overdue))
        );

        let returned = open_loan("3").with_status(LoanStatus::Returned);
        assert_eq!(
            gw.pre_renew(&returned, now()),
            Err(RenewError::NotRenewable(NotRenewableReason::Closed))
        );

        let undated = Loan::new("4", "EXE-4", "USR-00010");
        assert_eq!(
            gw.pre_renew(&undated, now()),
            Err(RenewError::NotRenewable(NotRenewableReason::IndeterminateDueDate))
        );

        assert_eq!(gw.pre_renew(&open_loan("5").with_renewals(2), now()), Ok(()));
    }

    #[test]
    fn test_pre_renew_limit_without_due_date() {
        let loan = Loan::new("6", "EXE-6", "USR-00010").with_renewals(3);
        assert_eq!(
            gateway(None).pre_renew(&loan, now()),
            Err(RenewError::NotRenewable(NotRenewableReason::RenewalLimitReached))
        );
    }

    #[test]
    fn test_pre_return_always_allowed() {
        let loan = open_loan("1").with_status(LoanStatus::Overdue);
        assert!(gateway(None).pre_return(&loan).is_ok());
    }
}
