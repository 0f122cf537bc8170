//! DDoS protection plan value type and naming convention.
//!
//! Pure functions only — the `az network ddos-protection list` call lives
//! behind a port; this module decides what counts as a reusable plan.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Shared plans follow the `<prefix>-ddos-plan` convention; matching is
/// case-insensitive on the `ddos` token.
#[allow(clippy::expect_used)] // pattern is a compile-time constant
static PLAN_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ddos").expect("valid pattern"));

/// Resolved DDoS protection plan decision, consumed as pipeline input.
///
/// `reuse` is only ever `true` when an id is present; the constructors are
/// the only way to build a value, so the pairing cannot be violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdosPlan {
    id: Option<String>,
    reuse: bool,
}

impl DdosPlan {
    /// No plan at all — the pipeline neither provisions nor reuses one.
    #[must_use]
    pub fn none() -> Self {
        Self { id: None, reuse: false }
    }

    /// No existing plan to reuse — the pipeline creates a new one.
    #[must_use]
    pub fn fresh() -> Self {
        Self { id: None, reuse: false }
    }

    /// Reuse the plan with the given id.
    #[must_use]
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            reuse: true,
        }
    }

    /// Id of the plan to reuse, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the pipeline should reuse an existing plan.
    #[must_use]
    pub fn reuse(&self) -> bool {
        self.reuse
    }
}

/// One entry of `az network ddos-protection list --output json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanListing {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Pick the first listed plan whose name follows the shared-plan naming
/// convention. Zero matches is a normal outcome.
#[must_use]
pub fn find_shared_plan(listings: &[PlanListing]) -> Option<&PlanListing> {
    listings
        .iter()
        .find(|p| PLAN_NAME_PATTERN.is_match(&p.name))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
