//! Data models for the Biblioteca Imperial backend records

pub mod copy;
pub mod loan;
pub mod user;
pub mod work;

// Re-export commonly used types
pub use copy::{BorrowRequest, CopyAvailability};
pub use loan::{Fine, FineStatus, Loan, LoanStatus, MAX_RENEWALS};
pub use user::{AccessLevel, LoginResponse, User, UserGroup, UserRequest};
pub use work::{Author, AuthorRequest, Category, CategoryRequest, Work, WorkRequest};
