//! Infrastructure adapter for the Terraform CLI.
//!
//! `TerraformCli<R>` implements the `IacBackend` port. Init and apply run
//! with inherited stdio so Terraform's own diagnostics reach the operator
//! verbatim; only the outputs query is captured.

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, IacBackend};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};

/// Terraform CLI adapter. All commands run in the current working
/// directory; the deploy service owns directory scoping.
pub struct TerraformCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> TerraformCli<R> {
    /// Create a new adapter with an explicit runner instance.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl TerraformCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self {
            runner: TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
        }
    }
}

impl<R: CommandRunner> IacBackend for TerraformCli<R> {
    async fn init(&self) -> Result<std::process::ExitStatus> {
        self.runner
            .run_status("terraform", &["init"])
            .await
            .context("terraform init")
    }

    async fn apply(&self, var_file: &Path) -> Result<std::process::ExitStatus> {
        let var_file_arg = format!("-var-file={}", var_file.display());
        self.runner
            .run_status(
                "terraform",
                &["apply", "-input=false", "-auto-approve", &var_file_arg],
            )
            .await
            .context("terraform apply")
    }

    async fn outputs(&self) -> Result<Output> {
        self.runner
            .run("terraform", &["output", "-json"])
            .await
            .context("terraform output")
    }
}
