//! Azure account payloads and pure subscription validation.
//!
//! Pure functions only — no I/O, no async. The `az account show` call
//! itself lives behind a port; this module only understands its payload.

use anyhow::Result;
use serde::Deserialize;

use crate::domain::error::SessionError;

/// The subset of `az account show --output json` the orchestrator reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Subscription id the session is currently scoped to.
    pub id: String,
    /// Display name of the subscription.
    #[serde(default)]
    pub name: Option<String>,
}

impl Account {
    /// Parse an `az account show` JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] when the payload is empty or
    /// does not describe an account — `az` prints nothing useful on stdout
    /// when there is no session.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let account: Self =
            serde_json::from_slice(payload).map_err(|_| SessionError::NotLoggedIn)?;
        if account.id.is_empty() {
            return Err(SessionError::NotLoggedIn.into());
        }
        Ok(account)
    }
}

/// Check the active subscription against the expected target.
///
/// An absent target means any session is acceptable.
///
/// # Errors
///
/// Returns [`SessionError::SubscriptionMismatch`] when a target is given
/// and differs from the current id. Provisioning must never proceed
/// against an unintended subscription.
pub fn check_subscription(current: &str, expected: Option<&str>) -> Result<()> {
    match expected {
        Some(want) if want != current => Err(SessionError::SubscriptionMismatch {
            current: current.to_string(),
            expected: want.to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
