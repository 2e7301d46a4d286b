//! Work (obra) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category reference embedded in a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "idCategoria")]
    pub id: String,
    #[serde(default, alias = "nomeCategoria")]
    pub name: Option<String>,
    #[serde(default, alias = "nivelRestricao")]
    pub restriction_level: Option<i32>,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
}

/// Author reference embedded in a work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(alias = "idAutor")]
    pub id: String,
    #[serde(default, alias = "nomeAutor")]
    pub name: Option<String>,
    #[serde(default, alias = "biografia")]
    pub biography: Option<String>,
    #[serde(default, alias = "nacionalidade")]
    pub nationality: Option<String>,
}

/// Catalog work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(alias = "idObra")]
    pub id: String,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "subtitulo")]
    pub subtitle: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<Category>,
    #[serde(default, alias = "autores")]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default, alias = "anoPublicacao")]
    pub publication_year: Option<i32>,
    #[serde(default, alias = "totalExemplares")]
    pub total_copies: Option<i64>,
}

impl Work {
    /// Title with subtitle appended when present
    pub fn display_title(&self) -> String {
        match self.subtitle.as_deref().filter(|s| !s.is_empty()) {
            Some(subtitle) => format!("{}: {}", self.title, subtitle),
            None => self.title.clone(),
        }
    }

    pub fn author_names(&self) -> Vec<&str> {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect()
    }
}

/// Create or update work request, serialized in the backend's field names
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct WorkRequest {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[serde(rename = "subtitulo")]
    pub subtitle: Option<String>,
    #[validate(length(min = 10, max = 17, message = "ISBN must have 10 to 17 characters"))]
    pub isbn: String,
    #[serde(rename = "anoPublicacao")]
    #[validate(range(min = 1, max = 9999, message = "Invalid publication year"))]
    pub publication_year: i32,
    #[serde(rename = "idCategoria")]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[serde(rename = "editora")]
    pub publisher: Option<String>,
    #[serde(rename = "idioma")]
    pub language: Option<String>,
    #[serde(rename = "numPaginas")]
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub pages: Option<i32>,
    #[serde(rename = "sinopse")]
    pub synopsis: Option<String>,
    #[serde(rename = "localizacaoFisica")]
    pub location: Option<String>,
}

/// Create or update author request (admin console)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AuthorRequest {
    #[serde(rename = "nomeAutor")]
    #[validate(length(min = 1, max = 255, message = "Author name is required"))]
    pub name: String,
    #[serde(rename = "biografia")]
    pub biography: Option<String>,
    #[serde(rename = "nacionalidade")]
    pub nationality: Option<String>,
}

/// Create or update category request (admin console)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CategoryRequest {
    #[serde(rename = "nomeCategoria")]
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// Minimum access level needed to see works of this category
    #[serde(rename = "nivelRestricao")]
    #[validate(range(min = 1, max = 5, message = "Restriction level must be between 1 and 5"))]
    pub restriction_level: i32,
}
