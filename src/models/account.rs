//! Account model
//!
//! Represents a user of the bookstore: customer, staff or owner.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::privilege::Privilege;

/// A user account, keyed by `user_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique login identifier
    pub user_id: String,

    /// Password, compared verbatim on login
    pub password: String,

    /// Human-readable name
    pub display_name: String,

    /// Access level granted at login
    pub privilege: Privilege,
}

impl Account {
    /// Create a new account
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        privilege: Privilege,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            display_name: display_name.into(),
            privilege,
        }
    }

    /// Check a login password
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// Replace the password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, privilege {})",
            self.user_id, self.display_name, self.privilege
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("alice", "pw1", "Alice", Privilege::Customer);
        assert_eq!(account.user_id, "alice");
        assert_eq!(account.privilege, Privilege::Customer);
        assert!(account.password_matches("pw1"));
        assert!(!account.password_matches("pw2"));
    }

    #[test]
    fn test_set_password() {
        let mut account = Account::new("alice", "pw1", "Alice", Privilege::Customer);
        account.set_password("pw2");
        assert!(account.password_matches("pw2"));
    }

    #[test]
    fn test_display() {
        let account = Account::new("root", "sjtu", "root", Privilege::Owner);
        assert_eq!(account.to_string(), "root (root, privilege 7)");
    }
}
