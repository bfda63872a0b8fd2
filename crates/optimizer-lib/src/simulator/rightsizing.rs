//! Rightsizing scenarios
//!
//! A resource qualifies only when its average utilization sits below the
//! eligibility threshold; the savings rate then scales with how far below
//! the threshold it runs, up to a hard ceiling.

use crate::cost::{self, MIN_MONTHLY_COST, MIN_MONTHLY_SAVINGS};
use crate::models::{
    ActionType, PricingInfo, ResourceInfo, ScenarioParams, SimulationResult, UsageMetrics,
};
use crate::rules::RuleCatalog;

/// Average utilization (%) above which a resource is left alone
const ELIGIBILITY_THRESHOLD: f64 = 40.0;

/// Savings rate floor applied to every eligible resource
const BASE_SAVINGS_RATE: f64 = 0.3;

/// Ceiling on the savings rate (and cap fraction of baseline cost)
const MAX_SAVINGS_FRACTION: f64 = 0.5;

/// Downsizing risks under-provisioning at usage spikes
const FIXED_RISK_SCORE: f64 = 0.3;

const DIFFICULTY_TIER: u8 = 3;

const CONFIDENCE: f64 = 0.7;

pub(super) fn generate(
    catalog: &RuleCatalog,
    resource: &ResourceInfo,
    pricing: &PricingInfo,
    usage: &UsageMetrics,
    params: &ScenarioParams,
) -> Vec<SimulationResult> {
    if usage.avg >= ELIGIBILITY_THRESHOLD {
        return Vec::new();
    }

    let current = cost::current_cost(pricing.unit_price, 1.0, pricing.unit).max(MIN_MONTHLY_COST);
    let rate =
        (BASE_SAVINGS_RATE + (ELIGIBILITY_THRESHOLD - usage.avg) / 100.0).min(MAX_SAVINGS_FRACTION);
    let savings = (rate * current)
        .max(MIN_MONTHLY_SAVINGS)
        .min(MAX_SAVINGS_FRACTION * current);
    let priority = cost::priority_score(savings, FIXED_RISK_SCORE, DIFFICULTY_TIER);
    let basis = catalog.generate_basis_description(ActionType::Rightsizing, savings, params);

    let sized = match &resource.instance_type {
        Some(instance_type) => format!("{} ({})", resource.id, instance_type),
        None => resource.id.clone(),
    };

    vec![SimulationResult::from_costs(
        format!("rightsizing-{}", resource.id),
        current,
        savings,
        FIXED_RISK_SCORE,
        priority,
        CONFIDENCE,
        format!(
            "Downsize {} running at {:.0}% average utilization (p95 {:.0}%). {}",
            sized, usage.avg, usage.p95, basis
        ),
    )]
}
