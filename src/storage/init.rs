//! Storage initialization
//!
//! Handles first-run setup: a fresh store gets a single owner account.

use tracing::info;

use crate::config::settings::BootstrapAccount;
use crate::error::BookstoreResult;

use super::accounts::AccountRepository;

/// Seed an empty account store with the bootstrap owner account
pub fn create_bootstrap_account(
    accounts: &mut AccountRepository,
    bootstrap: &BootstrapAccount,
) -> BookstoreResult<()> {
    let account = bootstrap.to_account();
    info!(user_id = %account.user_id, "creating bootstrap account");
    accounts.insert(account)
}
