//! Subscription validation — the gate before any provisioning work.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::CloudIdentity;
use crate::domain::Account;
use crate::domain::account::check_subscription;
use crate::domain::error::SessionError;

/// Confirm an authenticated session exists and matches the expected
/// subscription.
///
/// Returns the validated current subscription id; the orchestrator records
/// it as a run parameter. No stage may run after a failure here.
///
/// # Errors
///
/// Returns [`SessionError::NotLoggedIn`] when no session exists, and
/// [`SessionError::SubscriptionMismatch`] when `expected` is present and
/// differs from the active subscription. Both are fatal.
pub async fn validate_subscription(
    cloud: &impl CloudIdentity,
    expected: Option<&str>,
) -> Result<String> {
    let out = cloud.show_account().await.context("az account show")?;
    if !out.status.success() {
        return Err(SessionError::NotLoggedIn.into());
    }

    let account = Account::parse(&out.stdout)?;
    check_subscription(&account.id, expected)?;
    Ok(account.id)
}
