//! Access-level gating of UI actions

use crate::models::AccessLevel;

/// Minimum level for entering the admin console (users, authors, categories)
pub const ADMIN_AREA_LEVEL: u8 = 3;
/// Minimum level for creating and editing works
pub const CATALOG_MANAGEMENT_LEVEL: u8 = 4;

/// Actions gated by the access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewCatalog,
    Borrow,
    ManageAdminArea,
    ManageWorks,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::ViewCatalog,
        Action::Borrow,
        Action::ManageAdminArea,
        Action::ManageWorks,
    ];

    fn required_level(self) -> u8 {
        match self {
            Action::ViewCatalog | Action::Borrow => AccessLevel::MIN.value(),
            Action::ManageAdminArea => ADMIN_AREA_LEVEL,
            Action::ManageWorks => CATALOG_MANAGEMENT_LEVEL,
        }
    }
}

/// Creating and editing works
pub fn can_manage_catalog_entities(level: AccessLevel) -> bool {
    allows(level, Action::ManageWorks)
}

/// Admin console and management of users, authors and categories
pub fn can_manage_admin_area(level: AccessLevel) -> bool {
    allows(level, Action::ManageAdminArea)
}

/// Every authenticated user may borrow
pub fn can_borrow(level: AccessLevel) -> bool {
    allows(level, Action::Borrow)
}

pub fn allows(level: AccessLevel, action: Action) -> bool {
    level.value() >= action.required_level()
}

pub fn permitted_actions(level: AccessLevel) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| allows(level, *action))
        .collect()
}
