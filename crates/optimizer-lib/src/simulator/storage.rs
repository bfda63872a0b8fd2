//! Storage lifecycle tiering scenarios
//!
//! Projects savings from transitioning data to a colder tier after a
//! retention window. Three retention variants are produced per resource;
//! the projected amount is the same for each since tier pricing, not the
//! transition age, drives the arithmetic.

use crate::cost::{self, MIN_MONTHLY_COST, MIN_MONTHLY_SAVINGS};
use crate::models::{ActionType, PricingInfo, ResourceInfo, ScenarioParams, SimulationResult};
use crate::rules::RuleCatalog;

/// Retention windows (days before transition) evaluated per resource
const RETENTION_VARIANTS: [u32; 3] = [30, 60, 90];

/// Assumed target-tier price as a fraction of the current tier price
const TARGET_TIER_PRICE_RATIO: f64 = 0.5;

/// Placeholder object size until storage inventory supplies real figures
const PLACEHOLDER_SIZE_GB: f64 = 100.0;

/// Savings cap as a fraction of the baseline cost
const MAX_SAVINGS_FRACTION: f64 = 0.5;

/// Lifecycle policies are reversible metadata changes
const FIXED_RISK_SCORE: f64 = 0.2;

const DIFFICULTY_TIER: u8 = 1;

/// Low until real object sizes replace the placeholder
const CONFIDENCE: f64 = 0.6;

pub(super) fn generate(
    catalog: &RuleCatalog,
    resource: &ResourceInfo,
    pricing: &PricingInfo,
    params: &ScenarioParams,
) -> Vec<SimulationResult> {
    let current =
        cost::current_cost(pricing.unit_price, PLACEHOLDER_SIZE_GB, pricing.unit).max(MIN_MONTHLY_COST);
    let target_price = pricing.unit_price * TARGET_TIER_PRICE_RATIO;
    let savings =
        cost::storage_lifecycle_savings(pricing.unit_price, target_price, PLACEHOLDER_SIZE_GB)
            .max(MIN_MONTHLY_SAVINGS)
            .min(MAX_SAVINGS_FRACTION * current);
    let priority = cost::priority_score(savings, FIXED_RISK_SCORE, DIFFICULTY_TIER);

    RETENTION_VARIANTS
        .iter()
        .map(|&retention_days| {
            let basis = catalog.generate_basis_description(ActionType::Storage, savings, params);
            SimulationResult::from_costs(
                format!("storage-{}-retention-{}d", resource.id, retention_days),
                current,
                savings,
                FIXED_RISK_SCORE,
                priority,
                CONFIDENCE,
                format!(
                    "Transition {} objects older than {} days to the {} tier. {}",
                    resource.id, retention_days, params.target_tier, basis
                ),
            )
        })
        .collect()
}
