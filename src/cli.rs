//! CLI argument parsing with clap derive, plus configuration resolution
//! and wiring of the production adapters.
//!
//! `azprov` exposes a single run entry point — no subcommands. Flags win
//! over environment variables, which win over the defaults file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use crate::app::AppContext;
use crate::application::services::deploy::{DeployOutcome, Deployer};
use crate::domain::config::{
    DEFAULT_IAC_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SECRET_EXPIRATION_DAYS, FileDefaults,
    GOV_CLOUD_NAME,
};
use crate::domain::error::ConfigError;
use crate::domain::{DeployConfig, ServicePrincipalCreds};
use crate::infra::azure::AzCli;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::StdFs;
use crate::infra::terraform::TerraformCli;
use crate::infra::tfvars::TfvarsEmitter;
use crate::infra::workdir::ProcessWorkdir;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Provision Azure infrastructure through az and Terraform
#[derive(Parser)]
#[command(name = "azprov", version, arg_required_else_help = false)]
pub struct Cli {
    /// Terraform root module directory
    #[arg(long, value_name = "DIR")]
    pub iac_dir: Option<PathBuf>,

    /// Target subscription id, validated against the active session
    #[arg(long, value_name = "ID", env = "ARM_SUBSCRIPTION_ID")]
    pub subscription_id: Option<String>,

    /// Non-interactive automation mode (managed identity or service principal login)
    #[arg(long, env = "TF_IN_AUTOMATION")]
    pub automated: bool,

    /// Use the Azure US Government cloud endpoints
    #[arg(long)]
    pub gov_cloud: bool,

    /// Secure-mode provisioning (enables network protection resources)
    #[arg(long)]
    pub secure_mode: bool,

    /// Provision or reuse a DDoS protection plan (requires --secure-mode)
    #[arg(long)]
    pub ddos_protection: bool,

    /// Reuse this DDoS protection plan id instead of discovering one
    #[arg(long, value_name = "ID", env = "AZPROV_DDOS_PLAN_ID")]
    pub ddos_plan_id: Option<String>,

    /// Days until provisioned secrets expire
    #[arg(long, value_name = "DAYS", env = "AZPROV_SECRET_EXPIRATION_DAYS")]
    pub secret_expiration_days: Option<i64>,

    /// Where to write the infrastructure outputs artifact
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Answer yes to prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Execute the provisioning run.
    ///
    /// # Errors
    ///
    /// Returns an error on any fatal stage failure; `main` maps it to exit
    /// code 1.
    pub async fn run(self) -> Result<()> {
        let app = AppContext::new(self.no_color, self.quiet, self.yes, self.automated);

        let defaults = YamlConfigStore.load().context("loading defaults file")?;
        let cfg = self.resolve(&defaults)?;
        cfg.validate()?;
        if !cfg.iac_dir.is_dir() {
            return Err(ConfigError::IacDirNotFound(cfg.iac_dir.display().to_string()).into());
        }

        let cloud = AzCli::default_runner();
        let iac = TerraformCli::default_runner();
        let reporter = TerminalReporter::new(&app.output);
        let deployer = Deployer {
            cloud: &cloud,
            iac: &iac,
            workdir: &ProcessWorkdir,
            var_files: &TfvarsEmitter,
            local_fs: &StdFs,
            reporter: &reporter,
        };

        // Reuse a discovered plan by default; interactive runs get a
        // prompt, and a declined or failed prompt opts out of sharing.
        let confirm_reuse = |id: &str| {
            app.confirm(
                &format!("Found existing DDoS protection plan '{id}'. Reuse it?"),
                true,
            )
            .unwrap_or(false)
        };

        // Ctrl-C cancels the run future, dropping the pipeline's workdir
        // guard before the process exits.
        let outcome = tokio::select! {
            res = deployer.run(&cfg, confirm_reuse, Utc::now()) => res?,
            _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
        };

        print_summary(&cfg, &outcome, &app.output);
        Ok(())
    }

    /// Merge flags, environment, and the defaults file into a
    /// [`DeployConfig`].
    fn resolve(&self, defaults: &FileDefaults) -> Result<DeployConfig> {
        let gov_cloud = self.gov_cloud
            || std::env::var("AZURE_ENVIRONMENT").is_ok_and(|v| v == GOV_CLOUD_NAME);

        let credentials = if self.automated {
            ServicePrincipalCreds::from_env()?
        } else {
            None
        };

        let iac_dir = self
            .iac_dir
            .clone()
            .or_else(|| defaults.iac_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IAC_DIR));

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
        // The pipeline changes directory mid-run; pin the artifact to
        // where the operator invoked us.
        let output_path = if output_path.is_absolute() {
            output_path
        } else {
            std::env::current_dir()
                .context("reading current directory")?
                .join(output_path)
        };

        Ok(DeployConfig {
            automated: self.automated,
            gov_cloud,
            subscription_id: self.subscription_id.clone(),
            secure_mode: self.secure_mode,
            ddos_enabled: self.ddos_protection,
            ddos_plan_id: self.ddos_plan_id.clone(),
            secret_expiration_days: self
                .secret_expiration_days
                .or(defaults.secret_expiration_days)
                .unwrap_or(DEFAULT_SECRET_EXPIRATION_DAYS),
            iac_dir,
            output_path,
            credentials,
        })
    }
}

/// Print the post-run summary.
fn print_summary(cfg: &DeployConfig, outcome: &DeployOutcome, ctx: &OutputContext) {
    if ctx.quiet {
        return;
    }
    ctx.header("Provisioning complete");
    ctx.kv("Subscription", &outcome.subscription_id);
    let ddos_desc = match outcome.ddos.id() {
        Some(id) if outcome.ddos.reuse() => format!("reusing {id}"),
        _ if cfg.secure_mode && cfg.ddos_enabled => "new plan provisioned".to_string(),
        _ => "not requested".to_string(),
    };
    ctx.kv("DDoS plan", &ddos_desc);
    let expiry = chrono::DateTime::from_timestamp(outcome.secret_expiration, 0)
        .map_or_else(|| outcome.secret_expiration.to_string(), |t| t.format("%Y-%m-%d").to_string());
    ctx.kv("Secrets expire", &expiry);
    ctx.kv("Outputs", &outcome.output_path.display().to_string());
}
