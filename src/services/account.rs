//! Account service
//!
//! Login/logout, registration, password changes and privileged account
//! management. Every precondition is checked before the first write.

use serde_json::json;

use crate::audit::{AuditEntry, EntityType, Operator};
use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{Account, Privilege};
use crate::session::SessionStack;
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a mut Storage,
    sessions: &'a mut SessionStack,
}

/// Account fields safe to write to the operation log
fn snapshot(account: &Account) -> serde_json::Value {
    json!({
        "user_id": account.user_id,
        "display_name": account.display_name,
        "privilege": account.privilege,
    })
}

/// The identity of the active session, for the operation log
pub(crate) fn current_operator(sessions: &SessionStack) -> Operator {
    match sessions.current() {
        Some(ctx) => Operator::user(ctx.user_id.clone(), ctx.privilege),
        None => Operator::anonymous(),
    }
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a mut Storage, sessions: &'a mut SessionStack) -> Self {
        Self { storage, sessions }
    }

    /// `su`: push a login onto the session stack
    pub fn login(&mut self, user_id: &str, password: Option<&str>) -> BookstoreResult<()> {
        self.sessions.push(&self.storage.accounts, user_id, password)
    }

    /// `logout`: pop the current login
    pub fn logout(&mut self) -> BookstoreResult<()> {
        self.sessions.pop().map(|_| ())
    }

    /// `register`: self-service customer signup, open to anyone
    pub fn register(
        &mut self,
        user_id: &str,
        password: &str,
        display_name: &str,
    ) -> BookstoreResult<Account> {
        self.insert(Account::new(
            user_id,
            password,
            display_name,
            Privilege::Customer,
        ))
    }

    /// `useradd`: staff create accounts strictly below their own privilege
    pub fn create(
        &mut self,
        user_id: &str,
        password: &str,
        privilege: Privilege,
        display_name: &str,
    ) -> BookstoreResult<Account> {
        self.sessions.require(Privilege::Staff)?;

        let caller = self.sessions.privilege();
        if privilege >= caller {
            return Err(BookstoreError::Permission {
                required: privilege.level().saturating_add(1),
                actual: caller.level(),
            });
        }

        self.insert(Account::new(user_id, password, display_name, privilege))
    }

    fn insert(&mut self, account: Account) -> BookstoreResult<Account> {
        self.storage.accounts.insert(account.clone())?;

        self.storage.log_operations(&[AuditEntry::create(
            current_operator(self.sessions),
            EntityType::Account,
            account.user_id.clone(),
            &snapshot(&account),
        )]);

        Ok(account)
    }

    /// `passwd`: change a password
    ///
    /// Without the current password only an owner may do this; with it,
    /// anyone who knows it may. Owners never need to supply a matching one.
    pub fn change_password(
        &mut self,
        user_id: &str,
        current: Option<&str>,
        new_password: &str,
    ) -> BookstoreResult<()> {
        let is_owner = self.sessions.privilege() == Privilege::Owner;
        let account = self.storage.accounts.require(user_id)?;

        match current {
            None if !is_owner => {
                return Err(BookstoreError::Permission {
                    required: Privilege::Owner.level(),
                    actual: self.sessions.privilege().level(),
                });
            }
            Some(current) if !is_owner && !account.password_matches(current) => {
                return Err(BookstoreError::Auth(format!(
                    "wrong password for '{}'",
                    user_id
                )));
            }
            _ => {}
        }

        let Some(account) = self.storage.accounts.get_mut(user_id) else {
            return Err(BookstoreError::account_not_found(user_id));
        };
        account.set_password(new_password);
        let after = snapshot(account);

        self.storage.log_operations(&[AuditEntry::update(
            current_operator(self.sessions),
            EntityType::Account,
            user_id,
            &after,
            &after,
            Some("password changed".to_string()),
        )]);

        Ok(())
    }

    /// `delete`: remove an account that nobody is logged in as
    pub fn delete(&mut self, user_id: &str) -> BookstoreResult<Account> {
        self.sessions.require(Privilege::Owner)?;
        self.storage.accounts.require(user_id)?;

        if self.sessions.contains_user(user_id) {
            return Err(BookstoreError::Auth(format!(
                "'{}' is logged in and cannot be deleted",
                user_id
            )));
        }

        let Some(account) = self.storage.accounts.remove(user_id) else {
            return Err(BookstoreError::account_not_found(user_id));
        };

        self.storage.log_operations(&[AuditEntry::delete(
            current_operator(self.sessions),
            EntityType::Account,
            user_id,
            &snapshot(&account),
        )]);

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BookstorePaths, BootstrapAccount};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, SessionStack) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &BootstrapAccount::default()).unwrap();
        (temp_dir, storage, SessionStack::new())
    }

    #[test]
    fn test_register_is_anonymous_customer() {
        let (_dir, mut storage, mut sessions) = setup();
        let mut service = AccountService::new(&mut storage, &mut sessions);

        let account = service.register("alice", "pw", "Alice").unwrap();
        assert_eq!(account.privilege, Privilege::Customer);

        let err = service.register("alice", "pw2", "Again").unwrap_err();
        assert!(matches!(err, BookstoreError::Duplicate { .. }));
    }

    #[test]
    fn test_create_requires_higher_privilege() {
        let (_dir, mut storage, mut sessions) = setup();
        let mut service = AccountService::new(&mut storage, &mut sessions);

        assert!(service
            .create("clerk", "pw", Privilege::Staff, "Clerk")
            .is_err());

        service.login("root", Some("sjtu")).unwrap();
        service
            .create("clerk", "pw", Privilege::Staff, "Clerk")
            .unwrap();
        assert!(service
            .create("owner2", "pw", Privilege::Owner, "Owner")
            .is_err());

        service.login("clerk", Some("pw")).unwrap();
        assert!(service
            .create("peer", "pw", Privilege::Staff, "Peer")
            .is_err());
        service
            .create("cust", "pw", Privilege::Customer, "Customer")
            .unwrap();
    }

    #[test]
    fn test_change_password_rules() {
        let (_dir, mut storage, mut sessions) = setup();
        let mut service = AccountService::new(&mut storage, &mut sessions);
        service.register("alice", "old", "Alice").unwrap();

        // Anonymous callers need the current password
        assert!(service.change_password("alice", None, "new").is_err());
        assert!(service
            .change_password("alice", Some("wrong"), "new")
            .is_err());
        service
            .change_password("alice", Some("old"), "new")
            .unwrap();

        // Owners may skip it or supply anything
        service.login("root", Some("sjtu")).unwrap();
        service.change_password("alice", None, "newer").unwrap();
        service
            .change_password("alice", Some("garbage"), "newest")
            .unwrap();
        assert!(service.change_password("ghost", None, "x").is_err());

        assert!(storage.accounts.get("alice").unwrap().password_matches("newest"));
    }

    #[test]
    fn test_delete_guards_logged_in_users() {
        let (_dir, mut storage, mut sessions) = setup();
        let mut service = AccountService::new(&mut storage, &mut sessions);
        service.register("alice", "pw", "Alice").unwrap();

        service.login("root", Some("sjtu")).unwrap();
        service.login("alice", None).unwrap();
        service.login("root", Some("sjtu")).unwrap();

        // alice is an ancestor session, root is the current one
        assert!(service.delete("alice").is_err());
        assert!(service.delete("root").is_err());

        service.logout().unwrap();
        service.logout().unwrap();
        service.delete("alice").unwrap();
        assert!(service.delete("alice").unwrap_err().is_not_found());
    }

    #[test]
    fn test_logout_on_empty_stack_fails() {
        let (_dir, mut storage, mut sessions) = setup();
        let mut service = AccountService::new(&mut storage, &mut sessions);
        assert!(matches!(service.logout(), Err(BookstoreError::Auth(_))));
    }
}
