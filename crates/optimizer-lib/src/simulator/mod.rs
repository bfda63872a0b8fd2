//! What-if scenario generation
//!
//! One generator per optimization action type, dispatched over the closed
//! [`ActionType`] union. Each branch takes collaborator-supplied facts
//! (resource, pricing, usage) plus the rule catalog and returns zero or
//! more [`SimulationResult`]s. The [`Simulator`] service wraps the
//! dispatch with resource resolution and per-resource failure isolation
//! for batch requests.

mod commitment;
mod offhours;
mod rightsizing;
mod storage;

pub use offhours::daily_off_hours;

use crate::inventory::{PricingSource, ResourceDiscovery, UsageSource};
use crate::models::{
    ActionType, PricingInfo, ResourceInfo, ScenarioParams, SimulationResult, UsageMetrics,
};
use crate::observability::SimulatorMetrics;
use crate::rules::RuleCatalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Generate all scenarios for one action type against one resource
pub fn generate_scenarios(
    catalog: &RuleCatalog,
    action: ActionType,
    resource: &ResourceInfo,
    pricing: &PricingInfo,
    usage: &UsageMetrics,
    params: &ScenarioParams,
) -> Vec<SimulationResult> {
    match action {
        ActionType::Offhours => offhours::generate(catalog, resource, pricing, usage, params),
        ActionType::Commitment => commitment::generate(catalog, resource, pricing, usage, params),
        ActionType::Storage => storage::generate(catalog, resource, pricing, params),
        ActionType::Rightsizing => rightsizing::generate(catalog, resource, pricing, usage, params),
        ActionType::Cleanup => {
            // Reserved variant, kept in the union for forward compatibility
            debug!(resource_id = %resource.id, "Cleanup scenarios not implemented yet");
            Vec::new()
        }
    }
}

/// Batch simulation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub resource_ids: Vec<String>,
    pub action: ActionType,
    #[serde(default)]
    pub params: Option<ScenarioParams>,
}

/// Batch simulation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub scenarios: Vec<SimulationResult>,
    pub action_type_code: String,
    pub total_resources: usize,
}

/// Runs simulations over batches of resources
///
/// Holds the immutable rule catalog and the collaborator handles. A
/// resource that fails to resolve (unknown id, missing pricing) is logged
/// and skipped; the batch never fails as a whole.
pub struct Simulator {
    catalog: Arc<RuleCatalog>,
    discovery: Arc<dyn ResourceDiscovery>,
    pricing: Arc<dyn PricingSource>,
    usage: Arc<dyn UsageSource>,
    metrics: SimulatorMetrics,
}

impl Simulator {
    pub fn new(
        catalog: Arc<RuleCatalog>,
        discovery: Arc<dyn ResourceDiscovery>,
        pricing: Arc<dyn PricingSource>,
        usage: Arc<dyn UsageSource>,
    ) -> Self {
        Self {
            catalog,
            discovery,
            pricing,
            usage,
            metrics: SimulatorMetrics::new(),
        }
    }

    /// Simulate one action across the requested resources.
    ///
    /// An empty id list yields an empty response; per-resource failures are
    /// skipped. Nothing in here surfaces an error to the caller.
    pub async fn simulate(&self, request: SimulateRequest) -> SimulateResponse {
        let started = Instant::now();
        let params = request.params.clone().unwrap_or_default();
        let total_resources = request.resource_ids.len();
        let mut scenarios = Vec::new();

        for resource_id in &request.resource_ids {
            match self.simulate_one(resource_id, request.action, &params).await {
                Ok(mut results) => scenarios.append(&mut results),
                Err(e) => {
                    warn!(
                        resource_id = %resource_id,
                        action = %request.action,
                        error = %e,
                        "Skipping resource in simulation batch"
                    );
                    self.metrics.inc_simulation_errors();
                }
            }
        }

        self.metrics.observe_simulation_latency(started.elapsed().as_secs_f64());
        self.metrics.add_scenarios_generated(scenarios.len() as i64);

        SimulateResponse {
            scenarios,
            action_type_code: request.action.code().to_string(),
            total_resources,
        }
    }

    async fn simulate_one(
        &self,
        resource_id: &str,
        action: ActionType,
        params: &ScenarioParams,
    ) -> anyhow::Result<Vec<SimulationResult>> {
        let resource = self.discovery.get_resource(resource_id).await?;
        let pricing = self.pricing.pricing_for(&resource).await?;
        let usage = self.usage.usage_for(&resource).await?;
        Ok(generate_scenarios(
            &self.catalog,
            action,
            &resource,
            &pricing,
            &usage,
            params,
        ))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }
}
