use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Username of the seeded administrator account. Deleting it is refused
/// so a deployment can never lock itself out.
pub const SEED_ADMIN_USERNAME: &str = "admin";

/// Initial password of the seeded administrator.
pub const SEED_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Viewer,
}

impl UserRole {
    /// Create and update projects, run exports.
    pub fn can_edit(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Editor)
    }

    /// Delete projects and users.
    pub fn can_delete(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// A dashboard account. Passwords are stored and compared in plaintext;
/// there is no hashing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, password: &str, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    pub fn is_seed_admin(&self) -> bool {
        self.username == SEED_ADMIN_USERNAME
    }
}

/// Account collection seeded when the store holds no users.
pub fn seed_users() -> Vec<User> {
    vec![User::new(SEED_ADMIN_USERNAME, SEED_ADMIN_PASSWORD, UserRole::Admin)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_capabilities() {
        assert!(UserRole::Admin.can_edit());
        assert!(UserRole::Admin.can_delete());
        assert!(UserRole::Editor.can_edit());
        assert!(!UserRole::Editor.can_delete());
        assert!(!UserRole::Viewer.can_edit());
        assert!(!UserRole::Viewer.can_manage_users());
    }

    #[test]
    fn seed_contains_exactly_one_admin() {
        let users = seed_users();
        assert_eq!(users.len(), 1);
        assert!(users[0].is_seed_admin());
        assert_eq!(users[0].role, UserRole::Admin);
    }
}
