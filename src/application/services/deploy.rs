//! Deploy orchestrator — the single use-case of the binary.
//!
//! Sequences login, subscription validation, DDoS plan resolution, secret
//! expiration, var-file emission, and the Terraform pipeline. Imports only
//! from `crate::domain` and `crate::application::ports`; all I/O is routed
//! through injected port traits.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::application::ports::{
    CloudCli, IacBackend, LocalFs, ProgressReporter, VarFileWriter, WorkdirScope,
};
use crate::application::services::account::validate_subscription;
use crate::application::services::ddos::{DdosOptions, resolve_ddos_plan};
use crate::application::services::login::{LoginOptions, ensure_session};
use crate::domain::{DdosPlan, DeployConfig};
use crate::domain::error::PipelineError;
use crate::domain::secrets::secret_expiration_epoch;

/// Result of a completed provisioning run.
#[derive(Debug)]
pub struct DeployOutcome {
    /// Subscription the run was validated against.
    pub subscription_id: String,
    /// DDoS protection plan decision.
    pub ddos: DdosPlan,
    /// Epoch seconds at which provisioned secrets expire.
    pub secret_expiration: i64,
    /// Path of the outputs artifact.
    pub output_path: std::path::PathBuf,
}

/// Collaborators for [`run_deployment`], injected so every stage can be
/// exercised with fakes.
pub struct Deployer<'a, C, I, W, V, F, R>
where
    C: CloudCli,
    I: IacBackend,
    W: WorkdirScope,
    V: VarFileWriter,
    F: LocalFs,
    R: ProgressReporter,
{
    pub cloud: &'a C,
    pub iac: &'a I,
    pub workdir: &'a W,
    pub var_files: &'a V,
    pub local_fs: &'a F,
    pub reporter: &'a R,
}

impl<C, I, W, V, F, R> Deployer<'_, C, I, W, V, F, R>
where
    C: CloudCli,
    I: IacBackend,
    W: WorkdirScope,
    V: VarFileWriter,
    F: LocalFs,
    R: ProgressReporter,
{
    /// Run one full provisioning pass.
    ///
    /// Stages communicate through a write-once parameter map: each stage
    /// inserts its own keys and never touches earlier ones. Nothing past
    /// subscription validation runs unless the active session matches the
    /// configured target.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; discovery failures degrade to
    /// creating a new plan and do not fail the run.
    pub async fn run(
        &self,
        cfg: &DeployConfig,
        confirm_reuse: impl Fn(&str) -> bool,
        now: DateTime<Utc>,
    ) -> Result<DeployOutcome> {
        let reporter = self.reporter;

        if cfg.automated {
            if let Some(target) = cfg.subscription_id.as_deref() {
                ensure_session(
                    self.cloud,
                    reporter,
                    &LoginOptions {
                        automated: true,
                        gov_cloud: cfg.gov_cloud,
                        subscription_id: target,
                        credentials: cfg.credentials.as_ref(),
                    },
                )
                .await?;
            }
        }

        reporter.step("validating subscription...");
        let subscription_id =
            validate_subscription(self.cloud, cfg.subscription_id.as_deref()).await?;
        reporter.success(&format!("subscription {subscription_id} validated"));

        let ddos = resolve_ddos_plan(
            self.cloud,
            reporter,
            &DdosOptions {
                secure_mode: cfg.secure_mode,
                enabled: cfg.ddos_enabled,
                provided_id: cfg.ddos_plan_id.clone(),
            },
            confirm_reuse,
        )
        .await;

        let secret_expiration = secret_expiration_epoch(cfg.secret_expiration_days, now)?;

        let mut params = BTreeMap::new();
        params.insert("subscription_id".to_string(), subscription_id.clone());
        params.insert(
            "ddos_plan_id".to_string(),
            ddos.id().unwrap_or_default().to_string(),
        );
        params.insert("use_existing_ddos_plan".to_string(), ddos.reuse().to_string());
        params.insert("secret_expiration_date".to_string(), secret_expiration.to_string());
        params.insert("in_automation".to_string(), cfg.automated.to_string());

        reporter.step("writing provisioning parameters...");
        let var_file = self
            .var_files
            .write_var_file(&cfg.iac_dir, &params)
            .await
            .context("writing var file")?;

        self.run_pipeline(cfg, &var_file).await?;

        Ok(DeployOutcome {
            subscription_id,
            ddos,
            secret_expiration,
            output_path: cfg.output_path.clone(),
        })
    }

    /// Init → plan/apply → outputs, scoped to the IaC directory.
    ///
    /// The workdir guard is held across every step and restores the prior
    /// directory when dropped, on success and on every error path alike.
    async fn run_pipeline(&self, cfg: &DeployConfig, var_file: &std::path::Path) -> Result<()> {
        let reporter = self.reporter;
        let _cwd = self
            .workdir
            .enter(&cfg.iac_dir)
            .with_context(|| format!("entering {}", cfg.iac_dir.display()))?;

        reporter.step("initializing the Terraform backend...");
        let status = self.iac.init().await.context("terraform init")?;
        if !status.success() {
            return Err(PipelineError::InitFailed { code: status.code().unwrap_or(-1) }.into());
        }

        reporter.step("planning and applying infrastructure changes...");
        let status = self.iac.apply(var_file).await.context("terraform apply")?;
        if !status.success() {
            return Err(PipelineError::ApplyFailed { code: status.code().unwrap_or(-1) }.into());
        }

        reporter.step("collecting infrastructure outputs...");
        let out = self.iac.outputs().await.context("terraform output")?;
        if !out.status.success() {
            return Err(PipelineError::Outputs(
                String::from_utf8_lossy(&out.stderr).into_owned(),
            )
            .into());
        }
        // The artifact is opaque, but it must at least be JSON.
        serde_json::from_slice::<serde_json::Value>(&out.stdout)
            .map_err(|e| PipelineError::Outputs(e.to_string()))?;

        self.local_fs
            .write(&cfg.output_path, &out.stdout)
            .with_context(|| format!("writing {}", cfg.output_path.display()))?;
        if !self.local_fs.exists(&cfg.output_path) {
            return Err(PipelineError::Outputs(format!(
                "artifact {} was not written",
                cfg.output_path.display()
            ))
            .into());
        }
        reporter.success("infrastructure applied");
        Ok(())
    }
}
