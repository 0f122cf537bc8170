//! Secret expiration policy.
//!
//! Expiration is date-based, not instant-based: the computed timestamp is
//! midnight UTC on the target calendar day, so repeated runs on the same
//! day produce an identical value.

use anyhow::Result;
use chrono::{DateTime, Days, NaiveTime, Utc};

use crate::domain::error::ConfigError;

/// Compute the epoch-seconds expiration for a secret created now.
///
/// The result is midnight UTC of the calendar date `days` days after
/// `now`; the time-of-day of `now` is discarded.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidExpirationDays`] when `days` is not
/// positive, or when the date addition overflows the calendar range.
pub fn secret_expiration_epoch(days: i64, now: DateTime<Utc>) -> Result<i64> {
    if days <= 0 {
        return Err(ConfigError::InvalidExpirationDays(days).into());
    }
    #[allow(clippy::cast_sign_loss)] // days > 0 checked above
    let expiry_date = now
        .date_naive()
        .checked_add_days(Days::new(days as u64))
        .ok_or(ConfigError::InvalidExpirationDays(days))?;
    Ok(expiry_date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
