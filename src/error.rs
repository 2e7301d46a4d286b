//! Error types for the Biblioteca Imperial client

use thiserror::Error;

/// Stable error codes for UI presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NotFound = 3,
    BadValue = 4,
    BackendUnavailable = 5,
    NoCopyAvailable = 6,
    UserIneligible = 7,
    NotRenewable = 8,
}

/// Why a loan record could not be fully interpreted.
///
/// Never fatal: the record is shown in a conservative "unknown" state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidLoanRecord {
    #[error("loan has no due date")]
    MissingDueDate,

    #[error("malformed due date: {0}")]
    MalformedDate(String),

    #[error("unknown loan status: {0}")]
    UnknownStatus(String),
}

/// Why a user may not borrow right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibilityReason {
    InactiveUser,
    UnpaidFines,
    LoanLimitReached,
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IneligibilityReason::InactiveUser => "inactive user",
            IneligibilityReason::UnpaidFines => "unpaid fines",
            IneligibilityReason::LoanLimitReached => "loan limit reached",
        };
        write!(f, "{}", label)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowError {
    #[error("No copy available for this work")]
    NoCopyAvailable,

    #[error("User is not eligible to borrow: {0}")]
    UserIneligible(IneligibilityReason),
}

/// Why a loan may not be renewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotRenewableReason {
    /// Already returned or cancelled
    Closed,
    /// Backend refused because the loan is not ATIVO (returned, cancelled or
    /// already flagged overdue); it does not say which
    NotActive,
    Overdue,
    RenewalLimitReached,
    /// Due date missing or unreadable
    IndeterminateDueDate,
}

impl std::fmt::Display for NotRenewableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NotRenewableReason::Closed => "loan is closed",
            NotRenewableReason::NotActive => "loan is not active",
            NotRenewableReason::Overdue => "loan is overdue",
            NotRenewableReason::RenewalLimitReached => "renewal limit reached",
            NotRenewableReason::IndeterminateDueDate => "due date is unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewError {
    #[error("Loan cannot be renewed: {0}")]
    NotRenewable(NotRenewableReason),
}

/// Any loan pre-check failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanActionError {
    #[error(transparent)]
    Borrow(#[from] BorrowError),

    #[error(transparent)]
    Renew(#[from] RenewError),
}

/// Loan action a backend rejection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    Borrow,
    Renew,
    Return,
}

/// Main client error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Borrow(#[from] BorrowError),

    #[error(transparent)]
    Renew(#[from] RenewError),
}

impl From<LoanActionError> for AppError {
    fn from(e: LoanActionError) -> Self {
        match e {
            LoanActionError::Borrow(e) => AppError::Borrow(e),
            LoanActionError::Renew(e) => AppError::Renew(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl AppError {
    /// Map a backend rejection onto the typed taxonomy when its message is
    /// recognisable. The backend answer stays authoritative either way.
    pub fn from_rejection(action: LoanAction, status: u16, message: String) -> Self {
        let lower = message.to_lowercase();
        let typed = match action {
            LoanAction::Borrow => {
                if lower.contains("não está disponível") || lower.contains("não disponível") {
                    Some(AppError::Borrow(BorrowError::NoCopyAvailable))
                } else if lower.contains("inativo") {
                    Some(AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::InactiveUser)))
                } else if lower.contains("pendente") {
                    Some(AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::UnpaidFines)))
                } else if lower.contains("limite") {
                    Some(AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::LoanLimitReached)))
                } else {
                    None
                }
            }
            LoanAction::Renew => {
                if lower.contains("limite") || lower.contains("máximo") {
                    Some(AppError::Renew(RenewError::NotRenewable(NotRenewableReason::RenewalLimitReached)))
                } else if lower.contains("atrasad") {
                    Some(AppError::Renew(RenewError::NotRenewable(NotRenewableReason::Overdue)))
                } else if lower.contains("não está ativo") || lower.contains("apenas empréstimos ativos") {
                    Some(AppError::Renew(RenewError::NotRenewable(NotRenewableReason::NotActive)))
                } else if lower.contains("devolvido") {
                    Some(AppError::Renew(RenewError::NotRenewable(NotRenewableReason::Closed)))
                } else {
                    None
                }
            }
            LoanAction::Return => None,
        };

        typed.unwrap_or(AppError::Backend { status, message })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Http(_) => ErrorCode::BackendUnavailable,
            AppError::Backend { status, .. } => match status {
                401 | 403 => ErrorCode::NotAuthorized,
                404 => ErrorCode::NotFound,
                400 | 422 => ErrorCode::BadValue,
                _ => ErrorCode::Failure,
            },
            AppError::Authentication(_) | AppError::Authorization(_) => ErrorCode::NotAuthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Config(_) | AppError::Serialization(_) => ErrorCode::Failure,
            AppError::Borrow(BorrowError::NoCopyAvailable) => ErrorCode::NoCopyAvailable,
            AppError::Borrow(BorrowError::UserIneligible(_)) => ErrorCode::UserIneligible,
            AppError::Renew(_) => ErrorCode::NotRenewable,
        }
    }

    /// Friendly message for the patron-facing UI
    pub fn user_message(&self) -> String {
        match self {
            AppError::Borrow(BorrowError::NoCopyAvailable) => {
                "Não há exemplares disponíveis para esta obra no momento.".to_string()
            }
            AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::InactiveUser)) => {
                "Usuário inativo. Entre em contato com o administrador.".to_string()
            }
            AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::UnpaidFines)) => {
                "Você possui multas pendentes.".to_string()
            }
            AppError::Borrow(BorrowError::UserIneligible(IneligibilityReason::LoanLimitReached)) => {
                "Você atingiu o limite de empréstimos simultâneos.".to_string()
            }
            AppError::Renew(RenewError::NotRenewable(NotRenewableReason::RenewalLimitReached)) => {
                "Você atingiu o limite de 3 renovações para este empréstimo.".to_string()
            }
            AppError::Renew(RenewError::NotRenewable(NotRenewableReason::Overdue)) => {
                "Não é possível renovar um empréstimo atrasado.".to_string()
            }
            AppError::Renew(RenewError::NotRenewable(NotRenewableReason::Closed)) => {
                "Este empréstimo já foi encerrado.".to_string()
            }
            AppError::Renew(RenewError::NotRenewable(NotRenewableReason::NotActive)) => {
                "Apenas empréstimos ativos podem ser renovados. Verifique se ele não está atrasado ou encerrado."
                    .to_string()
            }
            AppError::Renew(RenewError::NotRenewable(NotRenewableReason::IndeterminateDueDate)) => {
                "Não foi possível determinar a data de devolução deste empréstimo.".to_string()
            }
            AppError::Http(_) => "Erro de conexão. Verifique se o backend está rodando.".to_string(),
            AppError::Authentication(_) => "Email ou senha incorretos.".to_string(),
            AppError::Authorization(_) => "Acesso negado.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
