//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations and output helpers so each test
//! file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // not every test file uses every mock

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;
use azprov_cli::application::ports::{
    CloudIdentity, IacBackend, LocalFs, PlanLookup, ProgressReporter, VarFileWriter, WorkdirScope,
};
use azprov_cli::domain::ServicePrincipalCreds;

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

pub fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

fn unexpected<T>() -> Result<T> {
    anyhow::bail!("not expected in this test")
}

// ── Mock: session scoped to a fixed subscription ─────────────────────────────

/// Session exists; `az account show` reports `sub`; plan listing returns
/// `plans` as JSON. Login operations are not expected.
pub struct CloudSession {
    pub sub: &'static str,
    pub plans: &'static str,
}

impl CloudSession {
    pub fn with_sub(sub: &'static str) -> Self {
        Self { sub, plans: "[]" }
    }
}

impl CloudIdentity for CloudSession {
    async fn set_cloud(&self, _: &str) -> Result<Output> {
        unexpected()
    }
    async fn login_managed_identity(&self) -> Result<Output> {
        unexpected()
    }
    async fn login_service_principal(&self, _: &ServicePrincipalCreds) -> Result<Output> {
        unexpected()
    }
    async fn set_subscription(&self, _: &str) -> Result<Output> {
        unexpected()
    }
    async fn show_account(&self) -> Result<Output> {
        Ok(ok_output(
            format!(r#"{{"id":"{}","name":"Test"}}"#, self.sub).as_bytes(),
        ))
    }
}

impl PlanLookup for CloudSession {
    async fn list_ddos_plans(&self) -> Result<Output> {
        Ok(ok_output(self.plans.as_bytes()))
    }
}

// ── Mock: no session ─────────────────────────────────────────────────────────

pub struct NoCloudSession;

impl CloudIdentity for NoCloudSession {
    async fn set_cloud(&self, _: &str) -> Result<Output> {
        unexpected()
    }
    async fn login_managed_identity(&self) -> Result<Output> {
        unexpected()
    }
    async fn login_service_principal(&self, _: &ServicePrincipalCreds) -> Result<Output> {
        unexpected()
    }
    async fn set_subscription(&self, _: &str) -> Result<Output> {
        unexpected()
    }
    async fn show_account(&self) -> Result<Output> {
        Ok(err_output(b"Please run 'az login' to setup account."))
    }
}

impl PlanLookup for NoCloudSession {
    async fn list_ddos_plans(&self) -> Result<Output> {
        unexpected()
    }
}

// ── Mock: records identity calls in order ────────────────────────────────────

/// Every identity operation succeeds and is appended to `calls`.
#[derive(Default)]
pub struct RecordingCloud {
    pub calls: RefCell<Vec<String>>,
    pub fail_login: bool,
}

impl RecordingCloud {
    pub fn failing_login() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_login: true,
        }
    }
}

impl CloudIdentity for RecordingCloud {
    async fn set_cloud(&self, cloud: &str) -> Result<Output> {
        self.calls.borrow_mut().push(format!("cloud:{cloud}"));
        Ok(ok_output(b""))
    }
    async fn login_managed_identity(&self) -> Result<Output> {
        self.calls.borrow_mut().push("login:identity".to_string());
        if self.fail_login {
            return Ok(err_output(b"identity endpoint unreachable"));
        }
        Ok(ok_output(b""))
    }
    async fn login_service_principal(&self, creds: &ServicePrincipalCreds) -> Result<Output> {
        self.calls
            .borrow_mut()
            .push(format!("login:sp:{}", creds.client_id));
        if self.fail_login {
            return Ok(err_output(b"invalid client secret"));
        }
        Ok(ok_output(b""))
    }
    async fn set_subscription(&self, id: &str) -> Result<Output> {
        self.calls.borrow_mut().push(format!("account-set:{id}"));
        Ok(ok_output(b""))
    }
    async fn show_account(&self) -> Result<Output> {
        self.calls.borrow_mut().push("account-show".to_string());
        Ok(ok_output(br#"{"id":"sub-A","name":"Test"}"#))
    }
}

impl PlanLookup for RecordingCloud {
    async fn list_ddos_plans(&self) -> Result<Output> {
        self.calls.borrow_mut().push("ddos-list".to_string());
        Ok(ok_output(b"[]"))
    }
}

// ── Mock: plan lookup variants ───────────────────────────────────────────────

/// Listing succeeds with a fixed JSON payload.
pub struct PlansListed(pub &'static str);

impl PlanLookup for PlansListed {
    async fn list_ddos_plans(&self) -> Result<Output> {
        Ok(ok_output(self.0.as_bytes()))
    }
}

/// Listing is not expected to be called at all.
pub struct PlansNotQueried;

impl PlanLookup for PlansNotQueried {
    async fn list_ddos_plans(&self) -> Result<Output> {
        unexpected()
    }
}

/// Listing fails with a non-zero exit.
pub struct PlansListFails;

impl PlanLookup for PlansListFails {
    async fn list_ddos_plans(&self) -> Result<Output> {
        Ok(err_output(b"AuthorizationFailed"))
    }
}

// ── Mock: IaC backend recorder ───────────────────────────────────────────────

/// Records pipeline calls; exit codes are configurable per step.
pub struct IacRecorder {
    pub calls: RefCell<Vec<String>>,
    pub init_code: i32,
    pub apply_code: i32,
    pub outputs_json: &'static str,
}

impl IacRecorder {
    pub fn succeeding() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            init_code: 0,
            apply_code: 0,
            outputs_json: r#"{"backend_uri":{"value":"https://example"}}"#,
        }
    }

    pub fn failing_init() -> Self {
        Self {
            init_code: 1,
            ..Self::succeeding()
        }
    }

    pub fn failing_apply() -> Self {
        Self {
            apply_code: 1,
            ..Self::succeeding()
        }
    }
}

impl IacBackend for IacRecorder {
    async fn init(&self) -> Result<ExitStatus> {
        self.calls.borrow_mut().push("init".to_string());
        Ok(exit_status(self.init_code))
    }
    async fn apply(&self, var_file: &Path) -> Result<ExitStatus> {
        self.calls
            .borrow_mut()
            .push(format!("apply:{}", var_file.display()));
        Ok(exit_status(self.apply_code))
    }
    async fn outputs(&self) -> Result<Output> {
        self.calls.borrow_mut().push("outputs".to_string());
        Ok(ok_output(self.outputs_json.as_bytes()))
    }
}

// ── Mock: workdir, var files, fs, reporter ───────────────────────────────────

/// Workdir scope that records entries without touching the real cwd.
#[derive(Default)]
pub struct NoopWorkdir {
    pub entered: RefCell<Vec<PathBuf>>,
}

impl WorkdirScope for NoopWorkdir {
    fn enter(&self, dir: &Path) -> Result<Box<dyn std::any::Any>> {
        self.entered.borrow_mut().push(dir.to_path_buf());
        Ok(Box::new(()))
    }
}

/// Var file writer that records the parameter map instead of writing.
#[derive(Default)]
pub struct MemVarFiles {
    pub written: RefCell<Option<BTreeMap<String, String>>>,
}

impl VarFileWriter for MemVarFiles {
    async fn write_var_file(
        &self,
        dir: &Path,
        params: &BTreeMap<String, String>,
    ) -> Result<PathBuf> {
        *self.written.borrow_mut() = Some(params.clone());
        Ok(dir.join("azprov.tfvars.json"))
    }
}

/// In-memory `LocalFs`.
#[derive(Default)]
pub struct MemFs {
    pub files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
}

impl LocalFs for MemFs {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}

/// Reporter that swallows everything.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
