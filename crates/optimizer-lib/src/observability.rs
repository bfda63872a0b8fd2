//! Observability infrastructure for the cost optimizer
//!
//! Provides:
//! - Prometheus metrics (simulation/discovery latency, scenario and
//!   recommendation counters, catalog and inventory gauges)
//! - Structured JSON event logging with tracing

use prometheus::{register_histogram, register_int_gauge, Histogram, IntGauge};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<SimulatorMetricsInner> = OnceLock::new();

struct SimulatorMetricsInner {
    simulation_latency_seconds: Histogram,
    discovery_latency_seconds: Histogram,
    scenarios_generated: IntGauge,
    recommendations_served: IntGauge,
    simulation_errors: IntGauge,
    discovery_errors: IntGauge,
    rules_loaded: IntGauge,
    resources_discovered: IntGauge,
}

impl SimulatorMetricsInner {
    fn new() -> Self {
        Self {
            simulation_latency_seconds: register_histogram!(
                "cost_optimizer_simulation_latency_seconds",
                "Time spent simulating a batch of resources",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register simulation_latency_seconds"),

            discovery_latency_seconds: register_histogram!(
                "cost_optimizer_discovery_latency_seconds",
                "Time spent discovering resources across accounts",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register discovery_latency_seconds"),

            scenarios_generated: register_int_gauge!(
                "cost_optimizer_scenarios_generated_total",
                "Total number of simulation scenarios generated"
            )
            .expect("Failed to register scenarios_generated"),

            recommendations_served: register_int_gauge!(
                "cost_optimizer_recommendations_served_total",
                "Total number of recommendations returned to callers"
            )
            .expect("Failed to register recommendations_served"),

            simulation_errors: register_int_gauge!(
                "cost_optimizer_simulation_errors_total",
                "Total number of per-resource simulation failures"
            )
            .expect("Failed to register simulation_errors"),

            discovery_errors: register_int_gauge!(
                "cost_optimizer_discovery_errors_total",
                "Total number of per-account discovery failures"
            )
            .expect("Failed to register discovery_errors"),

            rules_loaded: register_int_gauge!(
                "cost_optimizer_rules_loaded",
                "Number of optimization rules in the active catalog"
            )
            .expect("Failed to register rules_loaded"),

            resources_discovered: register_int_gauge!(
                "cost_optimizer_resources_discovered",
                "Number of resources found in the last discovery sweep"
            )
            .expect("Failed to register resources_discovered"),
        }
    }
}

/// Simulator metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying registry entries.
#[derive(Clone)]
pub struct SimulatorMetrics {
    _private: (),
}

impl Default for SimulatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(SimulatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &SimulatorMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_simulation_latency(&self, duration_secs: f64) {
        self.inner().simulation_latency_seconds.observe(duration_secs);
    }

    pub fn observe_discovery_latency(&self, duration_secs: f64) {
        self.inner().discovery_latency_seconds.observe(duration_secs);
    }

    pub fn add_scenarios_generated(&self, count: i64) {
        self.inner().scenarios_generated.add(count);
    }

    pub fn inc_recommendations_served(&self, count: i64) {
        self.inner().recommendations_served.add(count);
    }

    pub fn inc_simulation_errors(&self) {
        self.inner().simulation_errors.inc();
    }

    pub fn inc_discovery_errors(&self) {
        self.inner().discovery_errors.inc();
    }

    pub fn set_rules_loaded(&self, count: i64) {
        self.inner().rules_loaded.set(count);
    }

    pub fn set_resources_discovered(&self, count: i64) {
        self.inner().resources_discovered.set(count);
    }
}

/// Structured logger for platform events
///
/// Emits consistent JSON-formatted events for simulations,
/// recommendations, and rule catalog lifecycle.
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log a completed simulation batch
    pub fn log_simulation(&self, action_code: &str, requested: usize, scenarios: usize) {
        info!(
            event = "simulation_completed",
            instance = %self.instance,
            action = %action_code,
            requested_resources = requested,
            scenarios = scenarios,
            "Simulation batch completed"
        );
    }

    /// Log a served recommendation list
    pub fn log_recommendations(&self, count: usize, total_savings: f64) {
        info!(
            event = "recommendations_served",
            instance = %self.instance,
            count = count,
            total_estimated_savings = total_savings,
            "Recommendations served"
        );
    }

    /// Log the rule catalog state after startup loading
    pub fn log_catalog_loaded(&self, rule_count: usize) {
        if rule_count == 0 {
            warn!(
                event = "rule_catalog_loaded",
                instance = %self.instance,
                rules = rule_count,
                "Rule catalog is empty, basis descriptions fall back to defaults"
            );
        } else {
            info!(
                event = "rule_catalog_loaded",
                instance = %self.instance,
                rules = rule_count,
                "Rule catalog loaded"
            );
        }
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str) {
        info!(
            event = "optimizer_started",
            instance = %self.instance,
            version = %version,
            "Cost optimizer started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "optimizer_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Cost optimizer shutting down"
        );
    }
}
