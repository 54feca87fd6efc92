//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tratics_core::roles::Role;
use tratics_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`PublicUser`], [`UserProfile`] or [`AdminUserView`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_column(&self.role)
    }

    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role(),
        }
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }

    pub fn to_admin_view(&self) -> AdminUserView {
        AdminUserView {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Identity fields returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
}

/// Self-service profile returned by `GET /api/me`.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub created_at: Timestamp,
}

/// User as shown in the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserView {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

/// DTO for a partial admin update. `None` leaves the column untouched;
/// `username: Some(None)` clears it.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<Option<String>>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}
