//! Entitlement and loan-state engine.
//!
//! Pure, synchronous functions: every input (user, loans, "now") is passed in
//! explicitly and a new value is returned. No network access happens here.

pub mod access;
pub mod fines;
pub mod gateway;
pub mod loan_state;

pub use access::{
    allows, can_borrow, can_manage_admin_area, can_manage_catalog_entities, permitted_actions, Action,
};
pub use fines::{has_unpaid_fines, total_unpaid_fines};
pub use gateway::{LoanActionGateway, LoanRules};
pub use loan_state::{classify_loan, EffectiveStatus, LoanClassification};
