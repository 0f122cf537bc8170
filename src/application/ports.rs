//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::cli`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::ServicePrincipalCreds;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout, the child process must be killed (not left
    /// orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// Used for external steps whose diagnostics must reach the operator's
    /// terminal verbatim.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Cloud Identity Ports ──────────────────────────────────────────────────────

/// Identity operations: endpoint selection, login, account scoping.
#[allow(async_fn_in_trait)]
pub trait CloudIdentity {
    /// Switch the active cloud endpoint (e.g. to the government cloud).
    async fn set_cloud(&self, cloud: &str) -> Result<Output>;
    /// Log in with the ambient managed identity.
    async fn login_managed_identity(&self) -> Result<Output>;
    /// Log in with explicit service-principal credentials.
    async fn login_service_principal(&self, creds: &ServicePrincipalCreds) -> Result<Output>;
    /// Set the active subscription for all subsequent queries.
    async fn set_subscription(&self, id: &str) -> Result<Output>;
    /// Query the active account as JSON.
    async fn show_account(&self) -> Result<Output>;
}

/// Read-only lookup of shared DDoS protection plans.
#[allow(async_fn_in_trait)]
pub trait PlanLookup {
    /// List DDoS protection plans in the subscription as JSON.
    async fn list_ddos_plans(&self) -> Result<Output>;
}

/// Composite trait — any type implementing both sub-traits is a `CloudCli`.
pub trait CloudCli: CloudIdentity + PlanLookup {}

/// Blanket implementation for the composite.
impl<T> CloudCli for T where T: CloudIdentity + PlanLookup {}

// ── IaC Backend Port ──────────────────────────────────────────────────────────

/// The Terraform pipeline boundary. All operations run in the current
/// working directory; the caller owns directory scoping.
#[allow(async_fn_in_trait)]
pub trait IacBackend {
    /// Initialize the backend. Diagnostics stream to the operator.
    async fn init(&self) -> Result<std::process::ExitStatus>;
    /// Compute and apply the change set in one non-interactive step,
    /// reading variables from `var_file`. Diagnostics stream to the
    /// operator.
    async fn apply(&self, var_file: &Path) -> Result<std::process::ExitStatus>;
    /// Read the machine-readable outputs as JSON (captured).
    async fn outputs(&self) -> Result<Output>;
}

// ── Working Directory Port ────────────────────────────────────────────────────

/// Scoped ownership of the process working directory.
pub trait WorkdirScope {
    /// Change into `dir`, returning a guard that restores the previous
    /// working directory when dropped — on every exit path.
    fn enter(&self, dir: &Path) -> Result<Box<dyn std::any::Any>>;
}

// ── Var File Port ─────────────────────────────────────────────────────────────

/// Emits the accumulated run parameters as a var file for the IaC layer.
#[allow(async_fn_in_trait)]
pub trait VarFileWriter {
    /// Write `params` into `dir` and return the var file path.
    async fn write_var_file(
        &self,
        dir: &Path,
        params: &BTreeMap<String, String>,
    ) -> Result<PathBuf>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the handful of local filesystem operations services need.
pub trait LocalFs {
    /// Write `contents` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
