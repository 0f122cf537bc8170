//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Every variant except
//! `DiscoveryError` is fatal: it propagates to `main` and terminates the
//! run with exit code 1. `DiscoveryError` degrades to "create a new plan"
//! inside the discovery service and never reaches the top level.

use thiserror::Error;

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors related to the active Azure session and subscription scoping.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(
        "No active Azure session. Run 'az login' first, or pass --automated \
         with managed-identity or service-principal credentials."
    )]
    NotLoggedIn,

    #[error(
        "Subscription mismatch: the active session is scoped to '{current}' but \
         '{expected}' was requested.\nSwitch with 'az account set --subscription \
         {expected}' or change the target subscription."
    )]
    SubscriptionMismatch { current: String, expected: String },
}

// ── Login errors ──────────────────────────────────────────────────────────────

/// Errors raised while establishing an automated session.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Azure login failed:\n{0}")]
    Failed(String),

    #[error("Switching to cloud '{cloud}' failed:\n{detail}")]
    CloudSwitch { cloud: String, detail: String },

    #[error("Setting the active subscription to '{id}' failed:\n{detail}")]
    SetSubscription { id: String, detail: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid secret expiration: {0} days. The value must be a positive number of days.")]
    InvalidExpirationDays(i64),

    #[error(
        "Automated mode requires a target subscription id. Set ARM_SUBSCRIPTION_ID \
         or pass --subscription-id."
    )]
    MissingSubscription,

    #[error("Service principal credentials are incomplete: {missing} is not set.")]
    IncompleteCredentials { missing: &'static str },

    #[error("IaC directory not found: {0}")]
    IacDirNotFound(String),
}

// ── Discovery errors ──────────────────────────────────────────────────────────

/// Non-fatal errors during DDoS plan discovery. The discovery service
/// reports these as a warning and falls back to creating a new plan.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("listing DDoS protection plans failed: {0}")]
    ListFailed(String),

    #[error("DDoS protection plan listing returned unparseable JSON: {0}")]
    BadPayload(String),
}

// ── Pipeline errors ───────────────────────────────────────────────────────────

/// Errors raised by the Terraform init/apply/outputs pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "Infrastructure init failed: terraform init exited with code {code}. \
         See the diagnostics above."
    )]
    InitFailed { code: i32 },

    #[error(
        "Infrastructure apply failed: terraform apply exited with code {code}. \
         The plan may be partially applied; inspect the diagnostics above \
         before re-running."
    )]
    ApplyFailed { code: i32 },

    #[error("Reading infrastructure outputs failed: {0}")]
    Outputs(String),
}
