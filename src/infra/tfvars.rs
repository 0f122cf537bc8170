//! Var file emission — the boundary to the IaC layer's configuration.
//!
//! The run parameters are a flat name-to-string mapping; Terraform reads
//! them back through `-var-file`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::VarFileWriter;

/// File name of the emitted var file inside the IaC directory.
pub const VAR_FILE_NAME: &str = "azprov.tfvars.json";

/// Production implementation of the `VarFileWriter` port: parameters as
/// JSON in the IaC directory.
pub struct TfvarsEmitter;

impl VarFileWriter for TfvarsEmitter {
    async fn write_var_file(
        &self,
        dir: &Path,
        params: &BTreeMap<String, String>,
    ) -> Result<PathBuf> {
        // The pipeline changes directory before apply runs, so the
        // returned path must stay valid from anywhere.
        let dir = dir
            .canonicalize()
            .with_context(|| format!("resolving {}", dir.display()))?;
        let path = dir.join(VAR_FILE_NAME);
        let payload = serde_json::to_vec_pretty(params).context("serializing parameters")?;
        std::fs::write(&path, payload)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
