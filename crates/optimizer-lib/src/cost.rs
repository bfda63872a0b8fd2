//! Cost arithmetic
//!
//! Pure, stateless functions shared by every scenario generator: baseline
//! monthly cost, commitment and storage-lifecycle savings, and the risk and
//! priority scores used for ranking. No I/O, no shared state.

use crate::models::{PricingUnit, UsageMetrics};

/// Billed hours in one month for hourly-priced resources
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Hours in the nominal 30-day month used for the off-hours savings fraction
pub const NOMINAL_MONTH_HOURS: f64 = 24.0 * 30.0;

/// Weekdays in one month (schedule approximation)
pub const WEEKDAYS_PER_MONTH: f64 = 22.0;

/// Floor applied to a computed baseline cost (USD/month)
pub const MIN_MONTHLY_COST: f64 = 10.0;

/// Floor applied to computed savings (USD/month)
pub const MIN_MONTHLY_SAVINGS: f64 = 1.0;

/// Qualitative risk starting point for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn base_score(self) -> f64 {
        match self {
            RiskLevel::Low => 0.25,
            RiskLevel::Medium => 0.50,
            RiskLevel::High => 0.75,
        }
    }
}

/// Schedule patterns considered stable enough to lower operational risk
const STABLE_PATTERNS: &[&str] = &["steady", "business-hours"];

/// Baseline monthly cost for a quantity at a unit price.
///
/// Hourly prices are scaled by [`HOURS_PER_MONTH`]; GB-month prices already
/// carry the monthly term, so the quantity is taken as-is.
pub fn current_cost(unit_price: f64, quantity: f64, unit: PricingUnit) -> f64 {
    match unit {
        PricingUnit::Hour => unit_price * quantity * HOURS_PER_MONTH,
        PricingUnit::GbMonth => unit_price * quantity,
    }
}

/// Risk score in [0, 1] for applying an action to a resource.
///
/// Starts from the qualitative base level and credits observed idleness and
/// schedule stability: a mostly-idle resource with a steady usage pattern is
/// a safer target than a busy, irregular one.
pub fn risk_score(usage: &UsageMetrics, base: RiskLevel) -> f64 {
    let idle_credit = 0.2 * usage.idle_ratio.clamp(0.0, 1.0);
    let stability_credit = if STABLE_PATTERNS.contains(&usage.schedule_pattern.as_str()) {
        0.1
    } else {
        0.0
    };
    (base.base_score() - idle_credit - stability_credit).clamp(0.0, 1.0)
}

/// Single sortable priority for a scenario.
///
/// Monotonically increasing in savings, decreasing in risk and in the
/// difficulty tier (1 = trivial, 3 = involved).
pub fn priority_score(savings: f64, risk_score: f64, difficulty_tier: u8) -> f64 {
    let difficulty = difficulty_tier.max(1) as f64;
    savings * (1.0 - risk_score.clamp(0.0, 1.0)) / difficulty
}

/// Monthly savings from covering a fraction of usage with committed pricing
pub fn commitment_savings(
    on_demand_price: f64,
    commitment_price: f64,
    coverage_fraction: f64,
    quantity: f64,
    unit: PricingUnit,
) -> f64 {
    let monthly_quantity = match unit {
        PricingUnit::Hour => quantity * HOURS_PER_MONTH,
        PricingUnit::GbMonth => quantity,
    };
    (on_demand_price - commitment_price) * coverage_fraction * monthly_quantity
}

/// Monthly savings from moving data to a cheaper storage tier
pub fn storage_lifecycle_savings(
    current_tier_price: f64,
    target_tier_price: f64,
    size_gb: f64,
) -> f64 {
    (current_tier_price - target_tier_price) * size_gb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(avg: f64, idle_ratio: f64, pattern: &str) -> UsageMetrics {
        UsageMetrics {
            avg,
            p95: avg * 1.5,
            p99: avg * 1.8,
            idle_ratio,
            schedule_pattern: pattern.to_string(),
            uptime_days: 30,
        }
    }

    #[test]
    fn test_current_cost_hourly_scales_to_month() {
        let cost = current_cost(0.1, 1.0, PricingUnit::Hour);
        assert!((cost - 73.0).abs() < 1e-9);
    }

    #[test]
    fn test_current_cost_gb_month_taken_as_is() {
        let cost = current_cost(0.023, 500.0, PricingUnit::GbMonth);
        assert!((cost - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_risk_score_bounds() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            let r = risk_score(&usage(50.0, 0.0, "irregular"), level);
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_higher_idle_lowers_risk() {
        let busy = risk_score(&usage(80.0, 0.1, "irregular"), RiskLevel::Medium);
        let idle = risk_score(&usage(10.0, 0.9, "irregular"), RiskLevel::Medium);
        assert!(idle < busy);
    }

    #[test]
    fn test_stable_pattern_lowers_risk() {
        let irregular = risk_score(&usage(50.0, 0.3, "irregular"), RiskLevel::Medium);
        let steady = risk_score(&usage(50.0, 0.3, "steady"), RiskLevel::Medium);
        let business = risk_score(&usage(50.0, 0.3, "business-hours"), RiskLevel::Medium);
        assert!(steady < irregular);
        assert!(business < irregular);
    }

    #[test]
    fn test_priority_monotone_in_savings() {
        assert!(priority_score(200.0, 0.3, 2) > priority_score(100.0, 0.3, 2));
    }

    #[test]
    fn test_priority_monotone_in_risk_and_difficulty() {
        assert!(priority_score(100.0, 0.1, 2) > priority_score(100.0, 0.5, 2));
        assert!(priority_score(100.0, 0.3, 1) > priority_score(100.0, 0.3, 3));
    }

    #[test]
    fn test_commitment_savings_hourly() {
        // (0.10 - 0.05) * 0.7 * 730
        let s = commitment_savings(0.10, 0.05, 0.7, 1.0, PricingUnit::Hour);
        assert!((s - 25.55).abs() < 1e-9);
    }

    #[test]
    fn test_storage_lifecycle_savings() {
        let s = storage_lifecycle_savings(0.023, 0.0115, 1000.0);
        assert!((s - 11.5).abs() < 1e-9);
    }
}
