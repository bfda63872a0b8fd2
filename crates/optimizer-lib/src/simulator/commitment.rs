//! Reserved-capacity commitment scenarios
//!
//! Sweeps three coverage levels against an assumed committed unit price.
//! Resources whose pricing entry is not commitment-applicable produce no
//! scenarios at all.

use crate::cost::{self, RiskLevel, MIN_MONTHLY_COST, MIN_MONTHLY_SAVINGS};
use crate::models::{
    ActionType, PricingInfo, ResourceInfo, ScenarioParams, SimulationResult, UsageMetrics,
};
use crate::rules::RuleCatalog;

/// Coverage fractions evaluated for every eligible resource
const COVERAGE_LEVELS: [f64; 3] = [0.5, 0.7, 0.9];

/// Assumed committed price as a fraction of the on-demand price.
///
/// Real commitment price sheets arrive via `PricingInfo.commitment_price`
/// but are not wired into the sweep yet. TODO: use the supplied
/// commitment price once the pricing collaborators populate it for every
/// provider.
const COMMITMENT_PRICE_RATIO: f64 = 0.5;

/// Savings cap as a fraction of the baseline cost
const MAX_SAVINGS_FRACTION: f64 = 0.7;

/// Commitments are contractual: low operational risk, high effort
const DIFFICULTY_TIER: u8 = 3;

const CONFIDENCE: f64 = 0.85;

pub(super) fn generate(
    catalog: &RuleCatalog,
    resource: &ResourceInfo,
    pricing: &PricingInfo,
    usage: &UsageMetrics,
    params: &ScenarioParams,
) -> Vec<SimulationResult> {
    if !pricing.commitment_applicable {
        return Vec::new();
    }

    let current = cost::current_cost(pricing.unit_price, 1.0, pricing.unit).max(MIN_MONTHLY_COST);
    let committed_price = pricing.unit_price * COMMITMENT_PRICE_RATIO;
    let risk = cost::risk_score(usage, RiskLevel::Low);

    COVERAGE_LEVELS
        .iter()
        .map(|&coverage| {
            let savings =
                cost::commitment_savings(pricing.unit_price, committed_price, coverage, 1.0, pricing.unit)
                    .max(MIN_MONTHLY_SAVINGS)
                    .min(MAX_SAVINGS_FRACTION * current);
            let priority = cost::priority_score(savings, risk, DIFFICULTY_TIER);
            let basis = catalog.generate_basis_description(ActionType::Commitment, savings, params);
            let coverage_pct = (coverage * 100.0).round() as u32;

            SimulationResult::from_costs(
                format!(
                    "commitment-{}-cov{}-{}yr",
                    resource.id, coverage_pct, params.commit_years
                ),
                current,
                savings,
                risk,
                priority,
                CONFIDENCE,
                format!(
                    "Commit {}% of {} usage for {} year(s) at committed pricing. {}",
                    coverage_pct, resource.id, params.commit_years, basis
                ),
            )
        })
        .collect()
}
