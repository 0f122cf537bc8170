//! Run configuration types and validators.
//!
//! `DeployConfig` is the fully resolved configuration for one provisioning
//! run: flags win over environment, environment wins over the defaults
//! file, the defaults file wins over built-ins. Resolution itself happens
//! in `cli.rs`; this module only holds the types and the pure checks.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Cloud name passed to `az cloud set` for government deployments.
pub const GOV_CLOUD_NAME: &str = "AzureUSGovernment";

/// Built-in default for `--secret-expiration-days`.
pub const DEFAULT_SECRET_EXPIRATION_DAYS: i64 = 365;

/// Built-in default for `--iac-dir`.
pub const DEFAULT_IAC_DIR: &str = "infra";

/// Built-in default for `--output`.
pub const DEFAULT_OUTPUT_FILE: &str = "inf_output.json";

// ── Service principal credentials ────────────────────────────────────────────

/// Explicit service-principal credentials, read from the `ARM_*`
/// environment variables in automated mode. Never accepted as flags.
#[derive(Debug, Clone)]
pub struct ServicePrincipalCreds {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

impl ServicePrincipalCreds {
    /// Read credentials from `ARM_CLIENT_ID` / `ARM_CLIENT_SECRET` /
    /// `ARM_TENANT_ID`.
    ///
    /// Returns `None` when `ARM_CLIENT_ID` is absent (managed-identity
    /// login is used instead).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteCredentials`] when the client id is
    /// set but the secret or tenant is missing.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(client_id) = std::env::var("ARM_CLIENT_ID") else {
            return Ok(None);
        };
        let client_secret = std::env::var("ARM_CLIENT_SECRET")
            .map_err(|_| ConfigError::IncompleteCredentials { missing: "ARM_CLIENT_SECRET" })?;
        let tenant_id = std::env::var("ARM_TENANT_ID")
            .map_err(|_| ConfigError::IncompleteCredentials { missing: "ARM_TENANT_ID" })?;
        Ok(Some(Self { client_id, client_secret, tenant_id }))
    }
}

// ── Resolved run configuration ───────────────────────────────────────────────

/// Fully resolved configuration for one provisioning run. Immutable once
/// built.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Non-interactive automation mode: identity-based login, no prompts.
    pub automated: bool,
    /// Use the Azure US Government cloud endpoints.
    pub gov_cloud: bool,
    /// Expected subscription id; validated against the active session.
    pub subscription_id: Option<String>,
    /// Secure-mode provisioning (gates all network-protection resources).
    pub secure_mode: bool,
    /// Provision or reuse a DDoS protection plan.
    pub ddos_enabled: bool,
    /// Reuse this plan id instead of discovering one.
    pub ddos_plan_id: Option<String>,
    /// Days until provisioned secrets expire.
    pub secret_expiration_days: i64,
    /// Terraform root module directory.
    pub iac_dir: PathBuf,
    /// Where the outputs artifact is written.
    pub output_path: PathBuf,
    /// Service-principal credentials, automated mode only.
    pub credentials: Option<ServicePrincipalCreds>,
}

impl DeployConfig {
    /// Validate the configuration before any cloud call is made.
    ///
    /// Pure checks only; the IaC directory's existence is checked at the
    /// composition root where filesystem access belongs.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the expiration days are not positive
    /// or when automated mode has no target subscription.
    pub fn validate(&self) -> Result<()> {
        if self.secret_expiration_days <= 0 {
            return Err(ConfigError::InvalidExpirationDays(self.secret_expiration_days).into());
        }
        if self.automated && self.subscription_id.is_none() {
            return Err(ConfigError::MissingSubscription.into());
        }
        Ok(())
    }
}

// ── Defaults file schema ─────────────────────────────────────────────────────

/// Optional defaults stored in `~/.azprov/config.yaml`. Only non-sensitive
/// settings live here; credentials always come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileDefaults {
    /// Default Terraform root module directory.
    pub iac_dir: Option<PathBuf>,
    /// Default secret expiration in days.
    pub secret_expiration_days: Option<i64>,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
