//! Core data models for the cost optimizer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Optimization action types
///
/// Closed set: every consumer matches exhaustively, and adding a variant
/// requires a matching scenario generator branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Scheduled stop/start of compute outside business hours
    Offhours,
    /// Reserved-capacity commitment versus on-demand pricing
    Commitment,
    /// Storage lifecycle tiering
    Storage,
    /// Resize a resource to match observed utilization
    Rightsizing,
    /// Reserved for unused-resource cleanup (not yet implemented)
    Cleanup,
}

impl ActionType {
    /// Stable wire code used in API responses and proposals
    pub fn code(&self) -> &'static str {
        match self {
            ActionType::Offhours => "OFFHOURS",
            ActionType::Commitment => "COMMITMENT",
            ActionType::Storage => "STORAGE",
            ActionType::Rightsizing => "RIGHTSIZING",
            ActionType::Cleanup => "CLEANUP",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cloud service providers covered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Ncp,
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudProvider::Aws => write!(f, "AWS"),
            CloudProvider::Azure => write!(f, "Azure"),
            CloudProvider::Gcp => write!(f, "GCP"),
            CloudProvider::Ncp => write!(f, "NCP"),
        }
    }
}

/// Billing unit of a pricing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingUnit {
    #[serde(rename = "hour")]
    Hour,
    #[serde(rename = "GB-month")]
    GbMonth,
}

/// Per-action scenario parameters
///
/// Every field carries a documented default so callers may send a partial
/// (or entirely absent) parameter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    /// Weekdays the off-hours schedule applies to
    pub weekdays: Vec<String>,
    /// Daily stop time, "HH:MM"
    pub stop_at: String,
    /// Daily start time, "HH:MM"
    pub start_at: String,
    /// IANA timezone of the schedule
    pub timezone: String,
    /// Scale to zero instances instead of stopping
    pub scale_to_zero: bool,
    /// Commitment coverage level used for naming/justification
    pub commit_level: f64,
    /// Commitment term in years
    pub commit_years: u32,
    /// Target storage tier
    pub target_tier: String,
    /// Days before objects transition to the target tier
    pub retention_days: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            weekdays: ["MON", "TUE", "WED", "THU", "FRI"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            stop_at: "20:00".to_string(),
            start_at: "08:30".to_string(),
            timezone: "Asia/Seoul".to_string(),
            scale_to_zero: false,
            commit_level: 0.7,
            commit_years: 1,
            target_tier: "Cold".to_string(),
            retention_days: 90,
        }
    }
}

/// A discovered cloud resource
///
/// Supplied by the resource-listing collaborators and treated as a
/// read-only fact inside the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub id: String,
    pub provider: CloudProvider,
    pub service: String,
    pub region: String,
    pub project: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

/// Pricing facts for a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingInfo {
    pub unit: PricingUnit,
    pub unit_price: f64,
    pub commitment_applicable: bool,
    /// Contracted unit price where a commitment plan exists
    #[serde(default)]
    pub commitment_price: f64,
}

/// Usage metrics for a resource
///
/// Supplied (possibly estimated) by the metric collaborators; the
/// simulator never generates usage figures of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub avg: f64,
    pub p95: f64,
    pub p99: f64,
    pub idle_ratio: f64,
    pub schedule_pattern: String,
    pub uptime_days: u32,
}

/// Account registered with the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_id: String,
    pub provider: CloudProvider,
    pub alias: String,
    pub active: bool,
}

/// Outcome of simulating one scenario against one resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario_name: String,
    pub current_cost: f64,
    pub new_cost: f64,
    pub savings: f64,
    pub risk_score: f64,
    pub priority_score: f64,
    pub confidence: f64,
    pub description: String,
}

impl SimulationResult {
    /// Build a result from a baseline cost and projected savings.
    ///
    /// The new cost is always derived (`max(0, current − savings)`), never
    /// passed in, so `new_cost == current_cost - savings` holds for any
    /// non-degenerate savings value and negative costs cannot appear.
    #[allow(clippy::too_many_arguments)]
    pub fn from_costs(
        scenario_name: impl Into<String>,
        current_cost: f64,
        savings: f64,
        risk_score: f64,
        priority_score: f64,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        let savings = savings.max(0.0);
        Self {
            scenario_name: scenario_name.into(),
            current_cost,
            new_cost: (current_cost - savings).max(0.0),
            savings,
            risk_score: risk_score.clamp(0.0, 1.0),
            priority_score,
            confidence: confidence.clamp(0.0, 1.0),
            description: description.into(),
        }
    }
}

/// A ranked recommendation presented to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub estimated_savings: f64,
    pub action_type_code: String,
    pub scenario: SimulationResult,
}
