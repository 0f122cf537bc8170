//! DDoS protection plan discovery — reuse-or-create policy.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! The reuse decision is a pluggable function so tests and automated runs
//! can supply deterministic stand-ins for the operator prompt.

use anyhow::Result;

use crate::application::ports::{PlanLookup, ProgressReporter};
use crate::domain::DdosPlan;
use crate::domain::ddos::{PlanListing, find_shared_plan};
use crate::domain::error::DiscoveryError;

/// Options for [`resolve_ddos_plan`].
pub struct DdosOptions {
    /// Secure-mode provisioning; `false` disables the whole step.
    pub secure_mode: bool,
    /// Whether a DDoS protection plan is wanted at all.
    pub enabled: bool,
    /// Explicitly configured plan id; always wins, no discovery.
    pub provided_id: Option<String>,
}

/// Decide which DDoS protection plan the pipeline should use.
///
/// The lookup is read-only; zero matches and lookup failures are both
/// normal outcomes that resolve to "create a new plan". `confirm_reuse`
/// is consulted only when discovery actually finds a shared plan; a
/// non-affirmative answer opts out of sharing by design.
pub async fn resolve_ddos_plan(
    cloud: &impl PlanLookup,
    reporter: &impl ProgressReporter,
    opts: &DdosOptions,
    confirm_reuse: impl Fn(&str) -> bool,
) -> DdosPlan {
    if !opts.secure_mode || !opts.enabled {
        return DdosPlan::none();
    }

    if let Some(id) = &opts.provided_id {
        reporter.step(&format!("using configured DDoS protection plan {id}"));
        return DdosPlan::existing(id.clone());
    }

    reporter.step("looking for an existing DDoS protection plan...");
    let found = match discover(cloud).await {
        Ok(found) => found,
        Err(err) => {
            reporter.warn(&format!("{err}; a new plan will be created"));
            return DdosPlan::fresh();
        }
    };

    let Some(listing) = found else {
        reporter.warn("no shared DDoS protection plan found; a new one will be created");
        return DdosPlan::fresh();
    };

    if confirm_reuse(&listing.id) {
        reporter.success(&format!("reusing DDoS protection plan {}", listing.name));
        DdosPlan::existing(listing.id)
    } else {
        reporter.step("creating a new DDoS protection plan instead");
        DdosPlan::fresh()
    }
}

/// Run the listing call and pick the first plan matching the shared-plan
/// naming convention.
async fn discover(cloud: &impl PlanLookup) -> Result<Option<PlanListing>, DiscoveryError> {
    let out = cloud
        .list_ddos_plans()
        .await
        .map_err(|e| DiscoveryError::ListFailed(e.to_string()))?;
    if !out.status.success() {
        return Err(DiscoveryError::ListFailed(
            String::from_utf8_lossy(&out.stderr).into_owned(),
        ));
    }
    let listings: Vec<PlanListing> = serde_json::from_slice(&out.stdout)
        .map_err(|e| DiscoveryError::BadPayload(e.to_string()))?;
    Ok(find_shared_plan(&listings).cloned())
}
