//! Unit tests for DDoS protection plan resolution.

#![allow(clippy::expect_used)]

use azprov_cli::application::services::ddos::{DdosOptions, resolve_ddos_plan};
use azprov_cli::domain::DdosPlan;

use crate::mocks::{NullReporter, PlansListFails, PlansListed, PlansNotQueried};

const ONE_PLAN: &str = r#"[{"id":"ddos-plan-1","name":"shared-ddos-plan"}]"#;

fn opts(secure_mode: bool, enabled: bool, provided_id: Option<&str>) -> DdosOptions {
    DdosOptions {
        secure_mode,
        enabled,
        provided_id: provided_id.map(str::to_owned),
    }
}

#[tokio::test]
async fn test_secure_mode_off_disables_the_step() {
    // Discovery must not run at all; PlansNotQueried bails if called.
    let plan = resolve_ddos_plan(
        &PlansNotQueried,
        &NullReporter,
        &opts(false, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::none());
}

#[tokio::test]
async fn test_disabled_plan_disables_the_step() {
    let plan = resolve_ddos_plan(
        &PlansNotQueried,
        &NullReporter,
        &opts(true, false, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::none());
}

#[tokio::test]
async fn test_configured_id_wins_without_discovery() {
    let plan = resolve_ddos_plan(
        &PlansNotQueried,
        &NullReporter,
        &opts(true, true, Some("plan-configured")),
        |_| false,
    )
    .await;
    assert_eq!(plan, DdosPlan::existing("plan-configured"));
}

#[tokio::test]
async fn test_discovered_plan_is_reused_by_default_in_automation() {
    let plan = resolve_ddos_plan(
        &PlansListed(ONE_PLAN),
        &NullReporter,
        &opts(true, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::existing("ddos-plan-1"));
}

#[tokio::test]
async fn test_operator_can_decline_a_discovered_plan() {
    let plan = resolve_ddos_plan(
        &PlansListed(ONE_PLAN),
        &NullReporter,
        &opts(true, true, None),
        |_| false,
    )
    .await;
    assert_eq!(plan, DdosPlan::fresh());
}

#[tokio::test]
async fn test_decision_sees_the_discovered_id() {
    let seen = std::cell::RefCell::new(String::new());
    let _ = resolve_ddos_plan(
        &PlansListed(ONE_PLAN),
        &NullReporter,
        &opts(true, true, None),
        |id| {
            *seen.borrow_mut() = id.to_string();
            true
        },
    )
    .await;
    assert_eq!(*seen.borrow(), "ddos-plan-1");
}

#[tokio::test]
async fn test_zero_matches_creates_a_new_plan() {
    let plan = resolve_ddos_plan(
        &PlansListed("[]"),
        &NullReporter,
        &opts(true, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::fresh());
}

#[tokio::test]
async fn test_unrelated_names_do_not_match_the_convention() {
    let listings = r#"[{"id":"fw-1","name":"hub-firewall-policy"}]"#;
    let plan = resolve_ddos_plan(
        &PlansListed(listings),
        &NullReporter,
        &opts(true, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::fresh());
}

#[tokio::test]
async fn test_listing_failure_degrades_to_a_new_plan() {
    let plan = resolve_ddos_plan(
        &PlansListFails,
        &NullReporter,
        &opts(true, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::fresh());
}

#[tokio::test]
async fn test_unparseable_listing_degrades_to_a_new_plan() {
    let plan = resolve_ddos_plan(
        &PlansListed("not json"),
        &NullReporter,
        &opts(true, true, None),
        |_| true,
    )
    .await;
    assert_eq!(plan, DdosPlan::fresh());
}
