//! Loan state classification.
//!
//! The effective status of a loan is always recomputed from its due date and
//! an injected "now"; the stored status string is only trusted when the due
//! date cannot be read, or when it already reports the loan as overdue.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::InvalidLoanRecord,
    models::{Loan, LoanStatus, MAX_RENEWALS},
};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Status shown to the patron
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectiveStatus {
    Active,
    Overdue,
    Returned,
    Cancelled,
    /// Neither the due date nor the stored status could be interpreted
    Unknown,
}

impl EffectiveStatus {
    pub fn is_open(self) -> bool {
        !matches!(self, EffectiveStatus::Returned | EffectiveStatus::Cancelled)
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EffectiveStatus::Active => "ATIVO",
            EffectiveStatus::Overdue => "ATRASADO",
            EffectiveStatus::Returned => "DEVOLVIDO",
            EffectiveStatus::Cancelled => "CANCELADO",
            EffectiveStatus::Unknown => "DESCONHECIDO",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanClassification {
    pub effective_status: EffectiveStatus,
    /// Whole days until the due date, rounded up; negative once overdue.
    /// `None` for closed loans and unreadable due dates.
    pub days_remaining: Option<i64>,
    pub is_renewable: bool,
    #[serde(skip)]
    pub record_error: Option<InvalidLoanRecord>,
}

impl LoanClassification {
    /// Days past due, for "Atrasado há N dia(s)"
    pub fn days_overdue(&self) -> i64 {
        match (self.effective_status, self.days_remaining) {
            (EffectiveStatus::Overdue, Some(days)) => (-days).max(0),
            _ => 0,
        }
    }

    /// Due on the current day and not yet past due
    pub fn is_due_today(&self) -> bool {
        self.effective_status == EffectiveStatus::Active && self.days_remaining == Some(0)
    }
}

/// `ceil(millis / day)`
fn ceil_days(millis: i64) -> i64 {
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

fn stored_fallback(status: Option<&LoanStatus>) -> (EffectiveStatus, Option<InvalidLoanRecord>) {
    match status {
        Some(LoanStatus::Active) => (EffectiveStatus::Active, None),
        Some(LoanStatus::Overdue) => (EffectiveStatus::Overdue, None),
        Some(LoanStatus::Returned) => (EffectiveStatus::Returned, None),
        Some(LoanStatus::Cancelled) => (EffectiveStatus::Cancelled, None),
        Some(LoanStatus::Unknown(raw)) => (
            EffectiveStatus::Unknown,
            Some(InvalidLoanRecord::UnknownStatus(raw.clone())),
        ),
        None => (EffectiveStatus::Unknown, None),
    }
}

/// Classify a loan at instant `now`
pub fn classify_loan(loan: &Loan, now: DateTime<Utc>) -> LoanClassification {
    match loan.status {
        Some(LoanStatus::Returned) => {
            return LoanClassification {
                effective_status: EffectiveStatus::Returned,
                days_remaining: None,
                is_renewable: false,
                record_error: None,
            }
        }
        Some(LoanStatus::Cancelled) => {
            return LoanClassification {
                effective_status: EffectiveStatus::Cancelled,
                days_remaining: None,
                is_renewable: false,
                record_error: None,
            }
        }
        _ => {}
    }

    let due = match loan.due_instant() {
        Ok(due) => due,
        Err(record_error) => {
            tracing::warn!(loan_id = %loan.id, "Unusable loan record: {}", record_error);
            let (effective_status, _) = stored_fallback(loan.status.as_ref());
            return LoanClassification {
                effective_status,
                days_remaining: None,
                is_renewable: false,
                record_error: Some(record_error),
            };
        }
    };

    let days_remaining = ceil_days((due - now).num_milliseconds());
    let stored_overdue = matches!(loan.status, Some(LoanStatus::Overdue));

    // Whole-day boundary: a loan due earlier today is still "vence hoje"
    let effective_status = if days_remaining < 0 || stored_overdue {
        EffectiveStatus::Overdue
    } else {
        EffectiveStatus::Active
    };

    // Unknown stored status is reported but does not block a readable due date
    let record_error = match &loan.status {
        Some(LoanStatus::Unknown(_)) => stored_fallback(loan.status.as_ref()).1,
        _ => None,
    };

    let is_renewable = effective_status == EffectiveStatus::Active && loan.renewal_count < MAX_RENEWALS;

    tracing::debug!(
        loan_id = %loan.id,
        status = %effective_status,
        days_remaining,
        is_renewable,
        "Loan classified"
    );

    LoanClassification {
        effective_status,
        days_remaining: Some(days_remaining),
        is_renewable,
        record_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 14, 30, 0).unwrap()
    }

    fn loan_due(offset: Duration) -> Loan {
        Loan::new("EMP-1", "EXE-1", "USR-1").with_due_date(now() + offset)
    }

    #[test]
    fn test_due_in_five_days() {
        let c = classify_loan(&loan_due(Duration::days(5)).with_renewals(1), now());
        assert_eq!(c.effective_status, EffectiveStatus::Active);
        assert_eq!(c.days_remaining, Some(5));
        assert!(c.is_renewable);
    }

    #[test]
    fn test_due_three_days_ago() {
        let c = classify_loan(&loan_due(Duration::days(-3)), now());
        assert_eq!(c.effective_status, EffectiveStatus::Overdue);
        assert_eq!(c.days_remaining, Some(-3));
        assert!(!c.is_renewable);
        assert_eq!(c.days_overdue(), 3);
    }

    #[test]
    fn test_due_exactly_now_is_active() {
        let c = classify_loan(&loan_due(Duration::zero()), now());
        assert_eq!(c.effective_status, EffectiveStatus::Active);
        assert_eq!(c.days_remaining, Some(0));
        assert!(c.is_due_today());
    }

    #[test]
    fn test_partial_days_round_up() {
        let c = classify_loan(&loan_due(Duration::hours(30)), now());
        assert_eq!(c.days_remaining, Some(2));

        let c = classify_loan(&loan_due(Duration::hours(-30)), now());
        assert_eq!(c.days_remaining, Some(-1));
        assert_eq!(c.effective_status, EffectiveStatus::Overdue);
    }

    #[test]
    fn test_earlier_the_same_day_is_still_due_today() {
        for offset in [Duration::seconds(-1), Duration::hours(-5), Duration::hours(-23)] {
            let c = classify_loan(&loan_due(offset), now());
            assert_eq!(c.effective_status, EffectiveStatus::Active);
            assert_eq!(c.days_remaining, Some(0));
            assert!(c.is_renewable);
            assert!(c.is_due_today());
        }
    }

    #[test]
    fn test_a_full_day_past_due_is_overdue() {
        let c = classify_loan(&loan_due(Duration::days(-1) - Duration::seconds(1)), now());
        assert_eq!(c.effective_status, EffectiveStatus::Overdue);
        assert_eq!(c.days_remaining, Some(-1));
        assert!(!c.is_renewable);
    }

    #[test]
    fn test_plain_date_on_its_due_day() {
        let mut loan = Loan::new("EMP-5", "EXE-1", "USR-1").with_status(LoanStatus::Active);
        loan.due_date = Some("2024-06-10".to_string());

        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Active);
        assert_eq!(c.days_remaining, Some(0));
        assert!(c.is_renewable);

        let next_morning = Utc.with_ymd_and_hms(2024, 6, 11, 8, 0, 0).unwrap();
        let c = classify_loan(&loan, next_morning);
        assert_eq!(c.effective_status, EffectiveStatus::Overdue);
        assert_eq!(c.days_remaining, Some(-1));
    }

    #[test]
    fn test_returned_ignores_due_date() {
        let loan = loan_due(Duration::days(-30)).with_status(LoanStatus::Returned);
        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Returned);
        assert_eq!(c.days_remaining, None);
        assert!(!c.is_renewable);
    }

    #[test]
    fn test_stored_overdue_wins_over_future_date() {
        let loan = loan_due(Duration::days(2)).with_status(LoanStatus::Overdue);
        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Overdue);
        assert_eq!(c.days_remaining, Some(2));
        assert!(!c.is_renewable);
    }

    #[test]
    fn test_stale_stored_active_is_reconciled() {
        let loan = loan_due(Duration::days(-1)).with_status(LoanStatus::Active);
        assert_eq!(classify_loan(&loan, now()).effective_status, EffectiveStatus::Overdue);
    }

    #[test]
    fn test_renewal_limit() {
        for count in 0..MAX_RENEWALS {
            assert!(classify_loan(&loan_due(Duration::days(4)).with_renewals(count), now()).is_renewable);
        }
        assert!(!classify_loan(&loan_due(Duration::days(4)).with_renewals(3), now()).is_renewable);
    }

    #[test]
    fn test_missing_due_date_falls_back_to_stored_status() {
        let loan = Loan::new("EMP-2", "EXE-1", "USR-1");
        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Active);
        assert_eq!(c.days_remaining, None);
        assert!(!c.is_renewable);
        assert_eq!(c.record_error, Some(InvalidLoanRecord::MissingDueDate));
    }

    #[test]
    fn test_malformed_date_and_unknown_status() {
        let mut loan = Loan::new("EMP-3", "EXE-1", "USR-1").with_status(LoanStatus::from("EXTRAVIADO"));
        loan.due_date = Some("amanhã".to_string());
        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Unknown);
        assert!(!c.is_renewable);
        assert!(matches!(c.record_error, Some(InvalidLoanRecord::MalformedDate(_))));
    }

    #[test]
    fn test_unknown_status_with_readable_date_is_recomputed() {
        let loan = loan_due(Duration::days(3)).with_status(LoanStatus::from("EXTRAVIADO"));
        let c = classify_loan(&loan, now());
        assert_eq!(c.effective_status, EffectiveStatus::Active);
        assert_eq!(
            c.record_error,
            Some(InvalidLoanRecord::UnknownStatus("EXTRAVIADO".to_string()))
        );
    }

    #[test]
    fn test_plain_date_due_is_midnight_utc() {
        let mut loan = Loan::new("EMP-4", "EXE-1", "USR-1");
        loan.due_date = Some("2024-06-15".to_string());
        let c = classify_loan(&loan, now());
        assert_eq!(c.days_remaining, Some(5));
    }
}
