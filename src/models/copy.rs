//! Copy (exemplar) availability record

use serde::{Deserialize, Serialize};

/// A physical copy of a work as listed by `/exemplares/obra/{id}/disponiveis`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyAvailability {
    #[serde(alias = "idExemplar")]
    pub copy_id: String,
    #[serde(default, alias = "idObra")]
    pub work_id: Option<String>,
    #[serde(default, alias = "disponivel")]
    pub available: bool,
    #[serde(default, alias = "codigoBarras")]
    pub barcode: Option<String>,
}

impl CopyAvailability {
    pub fn new(copy_id: impl Into<String>, work_id: impl Into<String>, available: bool) -> Self {
        Self {
            copy_id: copy_id.into(),
            work_id: Some(work_id.into()),
            available,
            barcode: None,
        }
    }
}

/// Borrow request body for `POST /emprestimos/realizar`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub id_exemplar: String,
    pub id_usuario: String,
    pub dias_emprestimo: u32,
}
