//! User entity and activity log types

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `login_count` and the activity log are mutated together during login as
/// one atomic unit of work; everything else is owned by the register and
/// update-profile flows.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub hashed_password: String,
    pub phone: String,
    pub login_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a user; the storage layer fills in the
/// id, counter and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub hashed_password: String,
    pub phone: String,
}

/// Kind of entry appended to the user activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Login,
}

impl ActivityKind {
    /// Storage representation of the activity kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Login => "LOGIN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_activity_storage_form() {
        assert_eq!(ActivityKind::Login.as_str(), "LOGIN");
    }
}
