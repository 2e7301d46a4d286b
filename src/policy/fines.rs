//! Unpaid fine totals

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Loan;

/// Sum of outstanding fines across a user's loans, rounded to centavos.
///
/// Paid or cancelled fines never count, even when the loan is still overdue.
pub fn total_unpaid_fines<'a, I>(loans: I) -> Decimal
where
    I: IntoIterator<Item = &'a Loan>,
{
    loans
        .into_iter()
        .filter_map(|loan| loan.fine.as_ref())
        .filter(|fine| fine.is_outstanding())
        .map(|fine| fine.amount.max(Decimal::ZERO))
        .sum::<Decimal>()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn has_unpaid_fines<'a, I>(loans: I) -> bool
where
    I: IntoIterator<Item = &'a Loan>,
{
    total_unpaid_fines(loans) > Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fine, FineStatus};
    use rust_decimal_macros::dec;

    fn loan(id: &str, fine: Option<Fine>) -> Loan {
        let loan = Loan::new(id, "EXE-1", "USR-1");
        match fine {
            Some(fine) => loan.with_fine(fine),
            None => loan,
        }
    }

    #[test]
    fn test_paid_fines_are_excluded() {
        let loans = vec![
            loan("EMP-1", Some(Fine::unpaid(dec!(10.50)))),
            loan("EMP-2", Some(Fine::paid(dec!(5.00)))),
        ];
        assert_eq!(total_unpaid_fines(&loans), dec!(10.50));
    }

    #[test]
    fn test_empty_and_fine_free() {
        assert_eq!(total_unpaid_fines(&Vec::<Loan>::new()), Decimal::ZERO);
        let loans = vec![loan("EMP-1", None), loan("EMP-2", None)];
        assert_eq!(total_unpaid_fines(&loans), Decimal::ZERO);
        assert!(!has_unpaid_fines(&loans));
    }

    #[test]
    fn test_order_independent() {
        let mut loans = vec![
            loan("EMP-1", Some(Fine::unpaid(dec!(2.00)))),
            loan("EMP-2", None),
            loan("EMP-3", Some(Fine::unpaid(dec!(0.335)))),
            loan("EMP-4", Some(Fine::paid(dec!(8.00)))),
            loan("EMP-5", Some(Fine::unpaid(dec!(4.10)))),
        ];
        let expected = total_unpaid_fines(&loans);
        assert_eq!(expected, dec!(6.44));

        for _ in 0..loans.len() {
            loans.rotate_left(1);
            assert_eq!(total_unpaid_fines(&loans), expected);
        }
        loans.reverse();
        assert_eq!(total_unpaid_fines(&loans), expected);
    }

    #[test]
    fn test_rounding_and_cancelled_status() {
        let loans = vec![
            loan("EMP-1", Some(Fine::unpaid(dec!(1.005)))),
            loan(
                "EMP-2",
                Some(Fine {
                    amount: dec!(3.00),
                    paid: false,
                    status: Some(FineStatus::Cancelled),
                }),
            ),
        ];
        assert_eq!(total_unpaid_fines(&loans), dec!(1.01));
    }
}
