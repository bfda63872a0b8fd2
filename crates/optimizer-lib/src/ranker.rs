//! Cross-provider recommendation ranking
//!
//! Discovers running resources across every active account, runs the
//! off-hours and commitment generators over the discovered set, and merges
//! the best candidates into a short, priority-ordered recommendation list.
//! A failing account is logged and skipped; discovery never aborts the
//! whole sweep.

use crate::inventory::{PricingSource, ResourceDiscovery, UsageSource};
use crate::models::{ActionType, Recommendation, ResourceInfo, ScenarioParams, SimulationResult};
use crate::observability::SimulatorMetrics;
use crate::rules::RuleCatalog;
use crate::simulator::generate_scenarios;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Upper bound on the returned recommendation list
const MAX_RECOMMENDATIONS: usize = 3;

/// Scenario-name marker of the commitment coverage variant that is ranked
const RANKED_COVERAGE_MARKER: &str = "cov70";

/// Builds the top-N recommendation list over all active accounts
pub struct RecommendationRanker {
    catalog: Arc<RuleCatalog>,
    discovery: Arc<dyn ResourceDiscovery>,
    pricing: Arc<dyn PricingSource>,
    usage: Arc<dyn UsageSource>,
    metrics: SimulatorMetrics,
}

impl RecommendationRanker {
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

    /// Top recommendations across every active account.
    ///
    /// Never fails: discovery and per-resource errors degrade to a shorter
    /// (possibly empty) list.
    pub async fn top_recommendations(&self) -> Vec<Recommendation> {
        let resources = self.discover_all().await;
        if resources.is_empty() {
            return Vec::new();
        }

        let params = ScenarioParams::default();
        let mut offhours_results = Vec::new();
        let mut commitment_results = Vec::new();

        for resource in &resources {
            let pricing = match self.pricing.pricing_for(resource).await {
                Ok(pricing) => pricing,
                Err(e) => {
                    warn!(resource_id = %resource.id, error = %e, "No pricing for resource, skipping");
                    continue;
                }
            };
            let usage = match self.usage.usage_for(resource).await {
                Ok(usage) => usage,
                Err(e) => {
                    warn!(resource_id = %resource.id, error = %e, "No usage for resource, skipping");
                    continue;
                }
            };

            offhours_results.extend(generate_scenarios(
                &self.catalog,
                ActionType::Offhours,
                resource,
                &pricing,
                &usage,
                &params,
            ));
            commitment_results.extend(generate_scenarios(
                &self.catalog,
                ActionType::Commitment,
                resource,
                &pricing,
                &usage,
                &params,
            ));
        }

        // Storage scenarios are not ranked yet: storage inventory discovery
        // is still owned by the provider listing collaborators upstream.

        let mut pool: Vec<(ActionType, SimulationResult)> = Vec::new();
        if let Some(best) = best_by_savings(offhours_results) {
            pool.push((ActionType::Offhours, best));
        }
        let seventy_percent: Vec<SimulationResult> = commitment_results
            .into_iter()
            .filter(|r| r.scenario_name.contains(RANKED_COVERAGE_MARKER))
            .collect();
        if let Some(best) = best_by_savings(seventy_percent) {
            pool.push((ActionType::Commitment, best));
        }

        pool.sort_by(|a, b| {
            b.1.priority_score
                .partial_cmp(&a.1.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pool.truncate(MAX_RECOMMENDATIONS);

        let recommendations: Vec<Recommendation> = pool
            .into_iter()
            .map(|(action, scenario)| Recommendation {
                title: title_for(action, scenario.savings),
                description: scenario.description.clone(),
                estimated_savings: scenario.savings,
                action_type_code: action.code().to_string(),
                scenario,
            })
            .collect();

        self.metrics.inc_recommendations_served(recommendations.len() as i64);
        recommendations
    }

    /// Running resources across all active accounts, one account at a time.
    /// A failing account is skipped without touching the others' results.
    async fn discover_all(&self) -> Vec<ResourceInfo> {
        let started = Instant::now();
        let accounts = match self.discovery.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "Account listing failed, no recommendations");
                self.metrics.inc_discovery_errors();
                return Vec::new();
            }
        };

        let mut resources = Vec::new();
        for account in &accounts {
            match self.discovery.list_running_resources(account).await {
                Ok(found) => {
                    debug!(
                        account_id = %account.account_id,
                        provider = %account.provider,
                        count = found.len(),
                        "Discovered resources"
                    );
                    resources.extend(found);
                }
                Err(e) => {
                    warn!(
                        account_id = %account.account_id,
                        error = %e,
                        "Resource listing failed for account, continuing with the rest"
                    );
                    self.metrics.inc_discovery_errors();
                }
            }
        }

        self.metrics.observe_discovery_latency(started.elapsed().as_secs_f64());
        self.metrics.set_resources_discovered(resources.len() as i64);
        resources
    }
}

fn best_by_savings(results: Vec<SimulationResult>) -> Option<SimulationResult> {
    results.into_iter().max_by(|a, b| {
        a.savings
            .partial_cmp(&b.savings)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Display title for a ranked action; unrecognized actions get a generic one
fn title_for(action: ActionType, savings: f64) -> String {
    match action {
        ActionType::Offhours => {
            format!("Save ${:.0}/month with an off-hours schedule", savings)
        }
        ActionType::Commitment => {
            format!("Save ${:.0}/month with a reserved commitment", savings)
        }
        ActionType::Storage => format!("Save ${:.0}/month with storage tiering", savings),
        ActionType::Rightsizing => format!("Save ${:.0}/month by rightsizing", savings),
        ActionType::Cleanup => "Review resources for potential savings".to_string(),
    }
}
