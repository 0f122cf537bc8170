//! Application context — cross-cutting state for the run.
//!
//! Owns terminal output and the interactivity policy. Automated runs,
//! `--yes`, and CI environments all suppress prompts the same way.

use anyhow::Result;

use crate::output::OutputContext;

/// Unified application context for the single provisioning command.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` or `--automated` is passed, or when the
    /// `CI` or `AZPROV_YES` environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, yes: bool, automated: bool) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AZPROV_YES").is_ok();
        Self {
            output: OutputContext::new(no_color, quiet),
            non_interactive: yes || automated || ci_env,
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true`, returns `default` immediately
    /// without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
