//! Session stack
//!
//! Logins nest: `su` pushes a context, `logout` pops it, and the top of the
//! stack is the identity every command runs as. An empty stack is the
//! anonymous state.

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::Privilege;
use crate::storage::AccountRepository;
use crate::validation;

/// One nested login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Logged-in account
    pub user_id: String,
    /// Privilege captured at login; later account changes do not affect it
    pub privilege: Privilege,
    /// ISBN chosen by `select`
    pub selected_isbn: Option<String>,
}

/// Stack of active logins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStack {
    frames: Vec<SessionContext>,
}

impl SessionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in as `user_id`
    ///
    /// With a password, it must match the stored one. Without, the current
    /// session must strictly outrank the target account.
    pub fn push(
        &mut self,
        accounts: &AccountRepository,
        user_id: &str,
        password: Option<&str>,
    ) -> BookstoreResult<()> {
        validation::user_token("user id", user_id)?;
        let account = accounts
            .get(user_id)
            .ok_or_else(|| BookstoreError::Auth(format!("unknown account '{}'", user_id)))?;

        match password {
            Some(password) => {
                if !account.password_matches(password) {
                    return Err(BookstoreError::Auth(format!(
                        "wrong password for '{}'",
                        user_id
                    )));
                }
            }
            None => {
                if self.privilege() <= account.privilege {
                    return Err(BookstoreError::Auth(format!(
                        "password required to log in as '{}'",
                        user_id
                    )));
                }
            }
        }

        self.frames.push(SessionContext {
            user_id: account.user_id.clone(),
            privilege: account.privilege,
            selected_isbn: None,
        });
        Ok(())
    }

    /// Log out of the current session
    pub fn pop(&mut self) -> BookstoreResult<SessionContext> {
        self.frames
            .pop()
            .ok_or_else(|| BookstoreError::Auth("no active session".into()))
    }

    /// The active session, if any
    pub fn current(&self) -> Option<&SessionContext> {
        self.frames.last()
    }

    /// User id of the active session
    pub fn current_user(&self) -> Option<&str> {
        self.current().map(|ctx| ctx.user_id.as_str())
    }

    /// Privilege of the active session, `Anonymous` when logged out
    pub fn privilege(&self) -> Privilege {
        self.current()
            .map(|ctx| ctx.privilege)
            .unwrap_or(Privilege::Anonymous)
    }

    /// Fail with `Permission` unless the active session has at least `required`
    pub fn require(&self, required: Privilege) -> BookstoreResult<()> {
        let actual = self.privilege();
        if actual < required {
            return Err(BookstoreError::Permission {
                required: required.level(),
                actual: actual.level(),
            });
        }
        Ok(())
    }

    /// ISBN selected in the active session
    pub fn selected(&self) -> Option<&str> {
        self.current().and_then(|ctx| ctx.selected_isbn.as_deref())
    }

    /// Selected ISBN, or `NoSelection`
    pub fn require_selected(&self) -> BookstoreResult<&str> {
        self.selected().ok_or(BookstoreError::NoSelection)
    }

    /// Set the active session's selection
    pub fn select(&mut self, isbn: &str) -> BookstoreResult<()> {
        let ctx = self
            .frames
            .last_mut()
            .ok_or_else(|| BookstoreError::Auth("no active session".into()))?;
        ctx.selected_isbn = Some(isbn.to_string());
        Ok(())
    }

    /// Point every selection of `old` at `new` after a book's key changed
    pub fn retarget_selection(&mut self, old: &str, new: &str) {
        for ctx in &mut self.frames {
            if ctx.selected_isbn.as_deref() == Some(old) {
                ctx.selected_isbn = Some(new.to_string());
            }
        }
    }

    /// Whether `user_id` is logged in at any depth
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.frames.iter().any(|ctx| ctx.user_id == user_id)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
