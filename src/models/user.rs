//! User model and access levels

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Access level (nível de acesso), the sole authorization signal.
///
/// Valid levels are 1 to 5. Anything else coming off the wire is treated as
/// unknown and resolves to level 1, the most restrictive tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct AccessLevel(u8);

impl AccessLevel {
    pub const MIN: AccessLevel = AccessLevel(1);
    pub const MAX: AccessLevel = AccessLevel(5);

    /// Build a level, rejecting values outside 1..=5
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(AccessLevel(value))
    }

    /// Resolve an optional raw level, defaulting to level 1
    pub fn from_raw(value: Option<i64>) -> Self {
        value.map(AccessLevel::from).unwrap_or_default()
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Descriptive group name for this level (display only)
    pub fn group_name(self) -> &'static str {
        match self.0 {
            5 => "Senhores da Biblioteca",
            4 => "Lexicanum",
            3 => "Escribas Imperiais",
            2 => "Scholam Progenium",
            _ => "Servos do Conhecimento",
        }
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<i64> for AccessLevel {
    fn from(v: i64) -> Self {
        u8::try_from(v)
            .ok()
            .and_then(AccessLevel::new)
            .unwrap_or_default()
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nível {} - {}", self.0, self.group_name())
    }
}

/// User group as sent by the backend: either just a name (login response)
/// or the full group record (user listings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserGroup {
    Named(String),
    Detailed(GroupDetails),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    #[serde(default, alias = "idGrupo")]
    pub id: Option<String>,
    #[serde(default, alias = "nomeGrupo")]
    pub name: Option<String>,
    #[serde(default, alias = "nivelAcesso")]
    pub access_level: Option<AccessLevel>,
}

impl UserGroup {
    pub fn name(&self) -> Option<&str> {
        match self {
            UserGroup::Named(name) => Some(name.as_str()),
            UserGroup::Detailed(details) => details.name.as_deref(),
        }
    }

    fn access_level(&self) -> Option<AccessLevel> {
        match self {
            UserGroup::Named(_) => None,
            UserGroup::Detailed(details) => details.access_level,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Logged-in user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "idUsuario")]
    pub id: String,
    #[serde(default, alias = "nome", alias = "nomeCompleto")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "nivelAcesso")]
    pub access_level: Option<AccessLevel>,
    #[serde(default = "default_active", alias = "ativo")]
    pub active: bool,
    /// Descriptive only; never used for authorization except as a fallback
    /// source of the access level.
    #[serde(default, alias = "grupo")]
    pub group: Option<UserGroup>,
}

impl User {
    /// Explicit level, else the group's level, else level 1
    pub fn effective_access_level(&self) -> AccessLevel {
        self.access_level
            .or_else(|| self.group.as_ref().and_then(UserGroup::access_level))
            .unwrap_or_default()
    }

    /// Group label for display, derived from the level when the backend sent none
    pub fn group_label(&self) -> &str {
        self.group
            .as_ref()
            .and_then(UserGroup::name)
            .unwrap_or_else(|| self.effective_access_level().group_name())
    }
}

/// Login response from `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "mensagem")]
    pub message: Option<String>,
    #[serde(alias = "usuario")]
    pub user: User,
}

/// Create or update user request (admin console)
#[derive(Clone, Default, Serialize, Validate)]
pub struct UserRequest {
    #[serde(rename = "nomeCompleto")]
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(rename = "idGrupo")]
    #[validate(length(min = 1, message = "Group is required"))]
    pub group_id: String,
    #[serde(rename = "ativo")]
    pub active: bool,
    /// Left out on update to keep the current password
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
}

impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("group_id", &self.group_id)
            .field("active", &self.active)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
