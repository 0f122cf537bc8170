//! Infrastructure adapter for the Azure CLI.
//!
//! `AzCli<R>` routes all `az` invocations through a `CommandRunner`.
//! Generic over `R: CommandRunner` so that tests can inject a mock runner
//! without spawning real processes.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CloudIdentity, CommandRunner, PlanLookup};
use crate::domain::ServicePrincipalCreds;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, DEFAULT_LOGIN_TIMEOUT, TokioCommandRunner};

/// Azure CLI adapter. Login calls go through a runner with a longer
/// timeout; everything else uses the query runner.
pub struct AzCli<R: CommandRunner> {
    query_runner: R,
    login_runner: R,
}

impl<R: CommandRunner> AzCli<R> {
    /// Create a new adapter with explicit runner instances.
    pub fn new(query_runner: R, login_runner: R) -> Self {
        Self {
            query_runner,
            login_runner,
        }
    }
}

impl AzCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self {
            query_runner: TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
            login_runner: TokioCommandRunner::new(DEFAULT_LOGIN_TIMEOUT),
        }
    }
}

impl<R: CommandRunner> CloudIdentity for AzCli<R> {
    async fn set_cloud(&self, cloud: &str) -> Result<Output> {
        self.query_runner
            .run("az", &["cloud", "set", "--name", cloud])
            .await
            .context("az cloud set")
    }

    async fn login_managed_identity(&self) -> Result<Output> {
        self.login_runner
            .run("az", &["login", "--identity"])
            .await
            .context("az login --identity")
    }

    async fn login_service_principal(&self, creds: &ServicePrincipalCreds) -> Result<Output> {
        self.login_runner
            .run(
                "az",
                &[
                    "login",
                    "--service-principal",
                    "--username",
                    &creds.client_id,
                    "--password",
                    &creds.client_secret,
                    "--tenant",
                    &creds.tenant_id,
                ],
            )
            .await
            .context("az login --service-principal")
    }

    async fn set_subscription(&self, id: &str) -> Result<Output> {
        self.query_runner
            .run("az", &["account", "set", "--subscription", id])
            .await
            .context("az account set")
    }

    async fn show_account(&self) -> Result<Output> {
        self.query_runner
            .run("az", &["account", "show", "--output", "json"])
            .await
            .context("az account show")
    }
}

impl<R: CommandRunner> PlanLookup for AzCli<R> {
    async fn list_ddos_plans(&self) -> Result<Output> {
        self.query_runner
            .run("az", &["network", "ddos-protection", "list", "--output", "json"])
            .await
            .context("az network ddos-protection list")
    }
}
