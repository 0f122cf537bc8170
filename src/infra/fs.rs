//! Infrastructure implementation of the `LocalFs` port.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::LocalFs;

/// Production `LocalFs` backed by `std::fs`.
pub struct StdFs;

impl LocalFs for StdFs {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create {}", parent.display()))?;
            }
        }
        std::fs::write(path, contents)
            .with_context(|| format!("cannot write {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
