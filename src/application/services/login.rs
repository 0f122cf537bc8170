//! Automated login — endpoint selection, identity login, account scoping.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};

use crate::application::ports::{CloudIdentity, ProgressReporter};
use crate::domain::ServicePrincipalCreds;
use crate::domain::config::GOV_CLOUD_NAME;
use crate::domain::error::LoginError;

/// Options for [`ensure_session`].
pub struct LoginOptions<'a> {
    /// Non-interactive automation mode. When `false` the whole step is a
    /// no-op: the operator is assumed to hold an interactive session.
    pub automated: bool,
    /// Switch to the government cloud endpoints before logging in.
    pub gov_cloud: bool,
    /// Target subscription, set as active after login.
    pub subscription_id: &'a str,
    /// Service-principal credentials; managed identity when absent.
    pub credentials: Option<&'a ServicePrincipalCreds>,
}

/// Establish a cloud session for an automated run.
///
/// Interactive runs return immediately. Automated runs optionally switch
/// the cloud endpoint, log in with whichever identity the configuration
/// provides, and always scope the session to the target subscription so
/// subsequent queries read the right account.
///
/// # Errors
///
/// Returns a [`LoginError`] on any non-zero response from the identity
/// tool. All variants are fatal.
pub async fn ensure_session(
    cloud: &impl CloudIdentity,
    reporter: &impl ProgressReporter,
    opts: &LoginOptions<'_>,
) -> Result<()> {
    if !opts.automated {
        return Ok(());
    }

    if opts.gov_cloud {
        reporter.step("switching to the Azure US Government cloud...");
        let out = cloud
            .set_cloud(GOV_CLOUD_NAME)
            .await
            .context("az cloud set")?;
        if !out.status.success() {
            return Err(LoginError::CloudSwitch {
                cloud: GOV_CLOUD_NAME.to_string(),
                detail: String::from_utf8_lossy(&out.stderr).into_owned(),
            }
            .into());
        }
    }

    let out = match opts.credentials {
        Some(creds) => {
            reporter.step("logging in with service principal...");
            cloud
                .login_service_principal(creds)
                .await
                .context("az login --service-principal")?
        }
        None => {
            reporter.step("logging in with managed identity...");
            cloud
                .login_managed_identity()
                .await
                .context("az login --identity")?
        }
    };
    if !out.status.success() {
        return Err(
            LoginError::Failed(String::from_utf8_lossy(&out.stderr).into_owned()).into(),
        );
    }

    let out = cloud
        .set_subscription(opts.subscription_id)
        .await
        .context("az account set")?;
    if !out.status.success() {
        return Err(LoginError::SetSubscription {
            id: opts.subscription_id.to_string(),
            detail: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
        .into());
    }
    reporter.success("session established");
    Ok(())
}
