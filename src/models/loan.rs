//! Loan (empréstimo) and fine (multa) models

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InvalidLoanRecord;

/// Maximum number of renewals a loan can accumulate
pub const MAX_RENEWALS: u32 = 3;

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Loan status as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    Active,
    Overdue,
    Returned,
    Cancelled,
    Unknown(String),
}

impl LoanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LoanStatus::Active => "ACTIVE",
            LoanStatus::Overdue => "OVERDUE",
            LoanStatus::Returned => "RETURNED",
            LoanStatus::Cancelled => "CANCELLED",
            LoanStatus::Unknown(raw) => raw.as_str(),
        }
    }

    /// Closed loans no longer hold a copy
    pub fn is_closed(&self) -> bool {
        matches!(self, LoanStatus::Returned | LoanStatus::Cancelled)
    }
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" | "ATIVO" => LoanStatus::Active,
            "OVERDUE" | "ATRASADO" => LoanStatus::Overdue,
            "RETURNED" | "DEVOLVIDO" => LoanStatus::Returned,
            "CANCELLED" | "CANCELED" | "CANCELADO" => LoanStatus::Cancelled,
            _ => LoanStatus::Unknown(s),
        }
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        LoanStatus::from(s.to_string())
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fine status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FineStatus {
    #[serde(rename = "PENDENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "PAGA", alias = "PAID")]
    Paid,
    #[serde(rename = "CANCELADA", alias = "CANCELLED")]
    Cancelled,
    #[serde(other)]
    Other,
}

/// Fine attached to the loan that generated it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    #[serde(default, alias = "valorMulta", deserialize_with = "null_as_default")]
    pub amount: Decimal,
    #[serde(default, alias = "paga", deserialize_with = "null_as_default")]
    pub paid: bool,
    #[serde(default, alias = "statusMulta")]
    pub status: Option<FineStatus>,
}

impl Fine {
    pub fn unpaid(amount: Decimal) -> Self {
        Self {
            amount,
            paid: false,
            status: Some(FineStatus::Pending),
        }
    }

    pub fn paid(amount: Decimal) -> Self {
        Self {
            amount,
            paid: true,
            status: Some(FineStatus::Paid),
        }
    }

    /// Still owed: not flagged paid and not settled or cancelled by status
    pub fn is_outstanding(&self) -> bool {
        !self.paid && !matches!(self.status, Some(FineStatus::Paid | FineStatus::Cancelled))
    }
}

/// Loan record as returned by `/emprestimos/usuario/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(alias = "idEmprestimo")]
    pub id: String,
    #[serde(default, alias = "idExemplar", deserialize_with = "null_as_default")]
    pub copy_id: String,
    #[serde(default, alias = "idUsuario", deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, alias = "dataEmprestimo")]
    pub loan_date: Option<String>,
    #[serde(default, alias = "dataPrevistaDevolucao")]
    pub due_date: Option<String>,
    #[serde(default, alias = "dataDevolucao")]
    pub return_date: Option<String>,
    #[serde(default, alias = "statusEmprestimo")]
    pub status: Option<LoanStatus>,
    #[serde(
        default,
        alias = "renovacoes",
        alias = "numeroRenovacoes",
        deserialize_with = "null_as_default"
    )]
    pub renewal_count: u32,
    #[serde(default, alias = "multa")]
    pub fine: Option<Fine>,
    #[serde(default, alias = "tituloObra")]
    pub title: Option<String>,
    #[serde(default, alias = "codigoBarras")]
    pub barcode: Option<String>,
}

impl Loan {
    pub fn new(id: impl Into<String>, copy_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            copy_id: copy_id.into(),
            user_id: user_id.into(),
            loan_date: None,
            due_date: None,
            return_date: None,
            status: Some(LoanStatus::Active),
            renewal_count: 0,
            fine: None,
            title: None,
            barcode: None,
        }
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due.to_rfc3339_opts(SecondsFormat::Millis, true));
        self
    }

    pub fn with_status(mut self, status: LoanStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_renewals(mut self, renewal_count: u32) -> Self {
        self.renewal_count = renewal_count;
        self
    }

    pub fn with_fine(mut self, fine: Fine) -> Self {
        self.fine = Some(fine);
        self
    }

    /// Stored status is RETURNED or CANCELLED
    pub fn is_closed(&self) -> bool {
        self.status.as_ref().map(LoanStatus::is_closed).unwrap_or(false)
    }

    /// Parse the due date into an instant
    pub fn due_instant(&self) -> Result<DateTime<Utc>, InvalidLoanRecord> {
        let raw = self
            .due_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(InvalidLoanRecord::MissingDueDate)?;
        parse_instant(raw).ok_or_else(|| InvalidLoanRecord::MalformedDate(raw.to_string()))
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, a naive ISO date-time (taken as UTC) or a plain date,
/// which is anchored at 00:00 UTC of that day.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
