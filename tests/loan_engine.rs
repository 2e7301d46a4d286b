//! Loan engine behaviour through the public API

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use biblioteca_imperial_client::{
    error::{BorrowError, NotRenewableReason, RenewError},
    models::{AccessLevel, Fine, Loan, LoanStatus, User},
    policy::{
        can_manage_admin_area, can_manage_catalog_entities, classify_loan, total_unpaid_fines, EffectiveStatus,
        LoanActionGateway, LoanRules,
    },
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn loan_due(id: &str, offset: Duration) -> Loan {
    Loan::new(id, "EXE-00001", "USR-00001").with_due_date(now() + offset)
}

fn reader() -> User {
    User {
        id: "USR-00001".to_string(),
        name: "Gregor Eisenhorn".to_string(),
        email: "eisenhorn@biblioimp.org".to_string(),
        access_level: AccessLevel::new(2),
        active: true,
        group: None,
    }
}

#[test]
fn test_returned_loans_stay_returned_whatever_the_due_date() {
    for offset in [-30, -1, 0, 1, 30] {
        let loan = loan_due("EMP-1", Duration::days(offset)).with_status(LoanStatus::Returned);
        let classification = classify_loan(&loan, now());
        assert_eq!(classification.effective_status, EffectiveStatus::Returned);
        assert!(!classification.is_renewable);
    }
}

#[test]
fn test_due_exactly_now_is_active_with_zero_days() {
    let classification = classify_loan(&loan_due("EMP-1", Duration::zero()), now());
    assert_eq!(classification.effective_status, EffectiveStatus::Active);
    assert_eq!(classification.days_remaining, Some(0));
}

#[test]
fn test_due_earlier_today_is_active() {
    for offset in [Duration::seconds(1), Duration::hours(5)] {
        let classification = classify_loan(&loan_due("EMP-1", -offset), now());
        assert_eq!(classification.effective_status, EffectiveStatus::Active);
        assert_eq!(classification.days_remaining, Some(0));
    }
}

#[test]
fn test_date_only_loan_is_renewable_on_its_due_day() {
    let mut loan = Loan::new("EMP-9", "EXE-00001", "USR-00001").with_status(LoanStatus::Active);
    loan.due_date = Some("2024-03-15".to_string());

    let gateway = LoanActionGateway::new(LoanRules::default());
    assert_eq!(classify_loan(&loan, now()).effective_status, EffectiveStatus::Active);
    assert_eq!(gateway.pre_renew(&loan, now()), Ok(()));
}

#[test]
fn test_past_due_is_overdue_and_never_renewable() {
    for offset in [Duration::hours(25), Duration::days(2), Duration::days(40)] {
        for renewals in 0..=3 {
            let loan = loan_due("EMP-1", -offset).with_renewals(renewals);
            let classification = classify_loan(&loan, now());
            assert_eq!(classification.effective_status, EffectiveStatus::Overdue);
            assert!(!classification.is_renewable);
        }
    }
}

#[test]
fn test_renewal_limit() {
    for renewals in 0..3 {
        let loan = loan_due("EMP-1", Duration::days(2)).with_renewals(renewals);
        assert!(classify_loan(&loan, now()).is_renewable);
    }
    let loan = loan_due("EMP-1", Duration::days(2)).with_renewals(3);
    assert!(!classify_loan(&loan, now()).is_renewable);
}

#[test]
fn test_due_in_five_days() {
    let loan = loan_due("EMP-1", Duration::days(5)).with_renewals(1);
    let classification = classify_loan(&loan, now());
    assert_eq!(classification.effective_status, EffectiveStatus::Active);
    assert_eq!(classification.days_remaining, Some(5));
    assert!(classification.is_renewable);
}

#[test]
fn test_due_three_days_ago_with_stale_active_status() {
    let loan = loan_due("EMP-1", Duration::days(-3)).with_status(LoanStatus::Active);
    let classification = classify_loan(&loan, now());
    assert_eq!(classification.effective_status, EffectiveStatus::Overdue);
    assert_eq!(classification.days_remaining, Some(-3));
    assert!(!classification.is_renewable);
}

#[test]
fn test_unpaid_fine_total_ignores_order_and_paid_fines() {
    let loans = vec![
        loan_due("EMP-1", Duration::days(-4)).with_fine(Fine::unpaid(dec!(10.50))),
        loan_due("EMP-2", Duration::days(-9)).with_fine(Fine::paid(dec!(5.00))),
        loan_due("EMP-3", Duration::days(3)),
    ];
    assert_eq!(total_unpaid_fines(&loans), dec!(10.50));

    let reversed: Vec<Loan> = loans.iter().rev().cloned().collect();
    assert_eq!(total_unpaid_fines(&reversed), dec!(10.50));

    assert_eq!(total_unpaid_fines(&Vec::<Loan>::new()), Decimal::ZERO);
    assert_eq!(total_unpaid_fines(&loans[2..]), Decimal::ZERO);
}

#[test]
fn test_level_three_is_admin_but_not_cataloguer() {
    let level = AccessLevel::new(3).unwrap();
    assert!(can_manage_admin_area(level));
    assert!(!can_manage_catalog_entities(level));
}

#[test]
fn test_borrow_without_copies() {
    let gateway = LoanActionGateway::new(LoanRules::default());
    assert_eq!(
        gateway.pre_borrow(&reader(), &[], &[], now()),
        Err(BorrowError::NoCopyAvailable)
    );
}

#[test]
fn test_renew_at_limit() {
    let gateway = LoanActionGateway::new(LoanRules::default());
    let loan = loan_due("EMP-1", Duration::days(6))
        .with_status(LoanStatus::Active)
        .with_renewals(3);
    assert_eq!(
        gateway.pre_renew(&loan, now()),
        Err(RenewError::NotRenewable(NotRenewableReason::RenewalLimitReached))
    );
}
