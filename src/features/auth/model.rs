use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
            Role::Admin => ROLE_ADMIN,
            Role::User => ROLE_USER,
        }
    }

    pub fn for_admin(is_super_admin: bool) -> Self {
        if is_super_admin {
            Role::SuperAdmin
        } else {
            Role::Admin
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity injected by the auth middleware.
///
/// `id` refers to `admins.id` for admin roles and `users.id` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Admins and super admins
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// `(user_id, admin_id)` pair used by tables authored by either kind of account
    pub fn author_ids(&self) -> (Option<i64>, Option<i64>) {
        if self.is_admin() {
            (None, Some(self.id))
        } else {
            (Some(self.id), None)
        }
    }

    pub fn is_author(&self, user_id: Option<i64>, admin_id: Option<i64>) -> bool {
        self.author_ids() == (user_id, admin_id)
    }
}

/// JWT payload for locally issued access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = std::num::ParseIntError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.sub.parse()?,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let user = |role| AuthenticatedUser {
            id: 1,
            username: "x".to_string(),
            role,
        };

        assert!(user(Role::SuperAdmin).is_admin());
        assert!(user(Role::SuperAdmin).is_super_admin());
        assert!(user(Role::Admin).is_admin());
        assert!(!user(Role::Admin).is_super_admin());
        assert!(!user(Role::User).is_admin());
        assert!(user(Role::User).is_user());
    }

    #[test]
    fn test_author_ids_split_by_account_kind() {
        let admin = AuthenticatedUser {
            id: 4,
            username: "admin".to_string(),
            role: Role::Admin,
        };
        let citizen = AuthenticatedUser {
            id: 4,
            username: "warga".to_string(),
            role: Role::User,
        };

        assert_eq!(admin.author_ids(), (None, Some(4)));
        assert_eq!(citizen.author_ids(), (Some(4), None));
        assert!(citizen.is_author(Some(4), None));
        assert!(!admin.is_author(Some(4), None));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        assert_eq!(Role::for_admin(false).to_string(), "admin");
    }
}
