//! Off-hours scheduling scenarios
//!
//! Projects the savings from stopping a compute resource outside business
//! hours on a weekday schedule. The daily off-window is derived from the
//! stop/start times (wrapping around midnight when the start time is not
//! after the stop time) and extrapolated over a 22-weekday month.

use crate::cost::{
    self, RiskLevel, MIN_MONTHLY_COST, MIN_MONTHLY_SAVINGS, NOMINAL_MONTH_HOURS,
    WEEKDAYS_PER_MONTH,
};
use crate::models::{
    ActionType, PricingInfo, ResourceInfo, ScenarioParams, SimulationResult, UsageMetrics,
};
use crate::rules::RuleCatalog;
use chrono::NaiveTime;
use tracing::warn;

/// Savings cap as a fraction of the baseline cost
const MAX_SAVINGS_FRACTION: f64 = 0.5;

/// Implementation difficulty tier for schedule automation
const DIFFICULTY_TIER: u8 = 2;

/// Confidence in schedule-derived projections
const CONFIDENCE: f64 = 0.75;

/// Daily off-duration in hours between a stop and a start time.
///
/// When the start time is not after the stop time the window spans
/// midnight: stop 20:00 / start 08:30 is 12.5 hours off. Returns `None`
/// when either time fails to parse as `HH:MM`.
pub fn daily_off_hours(stop_at: &str, start_at: &str) -> Option<f64> {
    let stop = NaiveTime::parse_from_str(stop_at, "%H:%M").ok()?;
    let start = NaiveTime::parse_from_str(start_at, "%H:%M").ok()?;

    let stop_secs = stop.signed_duration_since(NaiveTime::MIN).num_seconds();
    let start_secs = start.signed_duration_since(NaiveTime::MIN).num_seconds();

    let off_secs = if start_secs <= stop_secs {
        86_400 - stop_secs + start_secs
    } else {
        start_secs - stop_secs
    };
    Some(off_secs as f64 / 3600.0)
}

/// True when the resource is excluded from off-hours scheduling.
///
/// A resource is excluded only when its tag map carries an `owner` key
/// whose value is the empty string. A resource with no `owner` tag at all
/// is NOT excluded. Pinned production behavior; do not invert without a
/// product decision.
fn excluded_by_owner_tag(resource: &ResourceInfo) -> bool {
    resource
        .tags
        .get("owner")
        .map(|owner| owner.is_empty())
        .unwrap_or(false)
}

pub(super) fn generate(
    catalog: &RuleCatalog,
    resource: &ResourceInfo,
    pricing: &PricingInfo,
    usage: &UsageMetrics,
    params: &ScenarioParams,
) -> Vec<SimulationResult> {
    if excluded_by_owner_tag(resource) {
        return Vec::new();
    }

    let Some(daily_off) = daily_off_hours(&params.stop_at, &params.start_at) else {
        warn!(
            resource_id = %resource.id,
            stop_at = %params.stop_at,
            start_at = %params.start_at,
            "Unparseable off-hours schedule, skipping resource"
        );
        return Vec::new();
    };

    let current = cost::current_cost(pricing.unit_price, 1.0, pricing.unit).max(MIN_MONTHLY_COST);
    let monthly_off_hours = daily_off * WEEKDAYS_PER_MONTH;
    let savings = (monthly_off_hours / NOMINAL_MONTH_HOURS * current)
        .max(MIN_MONTHLY_SAVINGS)
        .min(MAX_SAVINGS_FRACTION * current);

    let risk = cost::risk_score(usage, RiskLevel::Medium);
    let priority = cost::priority_score(savings, risk, DIFFICULTY_TIER);
    let basis = catalog.generate_basis_description(ActionType::Offhours, savings, params);

    let mode = if params.scale_to_zero { "scale-to-zero" } else { "stop" };
    let description = format!(
        "{} {} daily {}-{} ({}), {:.1}h off per weekday. {}",
        mode, resource.id, params.stop_at, params.start_at, params.timezone, daily_off, basis
    );

    vec![SimulationResult::from_costs(
        format!("offhours-{}-{}-{}", resource.id, params.stop_at, params.start_at),
        current,
        savings,
        risk,
        priority,
        CONFIDENCE,
        description,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::test_support::*;

    fn params() -> ScenarioParams {
        ScenarioParams::default()
    }

    #[test]
    fn test_daily_off_hours_overnight_window() {
        assert!((daily_off_hours("20:00", "08:30").unwrap() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_daily_off_hours_same_day_window() {
        // start > stop: plain difference, no midnight wrap
        let hours = daily_off_hours("08:00", "12:00").unwrap();
        assert!((hours - 4.0).abs() < 1e-9);
        assert!(hours > 0.0);
    }

    #[test]
    fn test_daily_off_hours_rejects_garbage() {
        assert!(daily_off_hours("25:99", "08:30").is_none());
        assert!(daily_off_hours("20:00", "morning").is_none());
    }

    #[test]
    fn test_savings_capped_at_half_of_current() {
        let catalog = RuleCatalog::empty();
        let results = generate(
            &catalog,
            &resource("i-1"),
            &hourly_pricing(0.5, true),
            &usage(60.0),
            &params(),
        );
        let r = &results[0];
        assert!(r.savings <= 0.5 * r.current_cost + 1e-9);
    }

    #[test]
    fn test_degenerate_price_is_floored() {
        let catalog = RuleCatalog::empty();
        let results = generate(
            &catalog,
            &resource("i-1"),
            &hourly_pricing(0.0001, true),
            &usage(60.0),
            &params(),
        );
        let r = &results[0];
        assert!((r.current_cost - MIN_MONTHLY_COST).abs() < 1e-9);
        assert!(r.savings >= MIN_MONTHLY_SAVINGS);
    }

    #[test]
    fn test_excludes_only_empty_owner_tag() {
        let catalog = RuleCatalog::empty();
        let pricing = hourly_pricing(0.05, true);
        let metrics = usage(60.0);

        // owner="" -> excluded
        let mut tagged_empty = resource("i-1");
        tagged_empty.tags.insert("owner".to_string(), String::new());
        assert!(generate(&catalog, &tagged_empty, &pricing, &metrics, &params()).is_empty());

        // no owner key at all -> still simulated (pinned behavior)
        let untagged = resource("i-2");
        assert_eq!(generate(&catalog, &untagged, &pricing, &metrics, &params()).len(), 1);

        // owner with a value -> simulated
        let mut owned = resource("i-3");
        owned.tags.insert("owner".to_string(), "platform".to_string());
        assert_eq!(generate(&catalog, &owned, &pricing, &metrics, &params()).len(), 1);
    }

    #[test]
    fn test_scenario_references_resource_and_schedule() {
        let catalog = RuleCatalog::empty();
        let results = generate(
            &catalog,
            &resource("i-42"),
            &hourly_pricing(0.1, true),
            &usage(60.0),
            &params(),
        );
        let r = &results[0];
        assert!(r.scenario_name.contains("i-42"));
        assert!(r.description.contains("20:00"));
        assert!(!r.description.is_empty());
    }
}
