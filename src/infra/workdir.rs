//! Scoped working-directory ownership for the pipeline.
//!
//! The process working directory is the only shared mutable resource in a
//! run. `ProcessWorkdir::enter` hands out a guard that restores the prior
//! directory when dropped — success, error propagation, unwind, and a
//! cancelled run (dropped future) all release it the same way.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::WorkdirScope;

/// Production implementation of the `WorkdirScope` port.
pub struct ProcessWorkdir;

impl WorkdirScope for ProcessWorkdir {
    fn enter(&self, dir: &Path) -> Result<Box<dyn std::any::Any>> {
        Ok(Box::new(WorkdirGuard::enter(dir)?))
    }
}

/// Guard that restores the previous working directory on drop.
pub struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    /// Change the process working directory to `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or `dir`
    /// cannot be entered.
    pub fn enter(dir: &Path) -> Result<Self> {
        let original = std::env::current_dir().context("reading current directory")?;
        std::env::set_current_dir(dir)
            .with_context(|| format!("entering {}", dir.display()))?;
        Ok(Self { original })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        // Nothing sensible to do if the original directory vanished.
        let _ = std::env::set_current_dir(&self.original);
    }
}
