//! Collaborator seams for resource, pricing, and usage facts
//!
//! The simulator core never talks to provider SDKs directly. It consumes
//! narrow traits for resource discovery, pricing lookup, and usage metrics,
//! and treats whatever they return as opaque facts. The real
//! per-provider listing clients live outside this crate; `StaticInventory`
//! is the in-process implementation used by the server (loaded from a JSON
//! fixture) and by tests.

use crate::models::{AccountInfo, PricingInfo, ResourceInfo, UsageMetrics};
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub use async_trait::async_trait;

/// Errors surfaced by inventory collaborators
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("no pricing entry for resource: {0}")]
    MissingPricing(String),
    #[error("account fetch failed for {account}: {reason}")]
    AccountFetch { account: String, reason: String },
    #[error("failed to load inventory fixture: {0}")]
    Fixture(#[from] std::io::Error),
    #[error("invalid inventory fixture: {0}")]
    InvalidFixture(#[from] serde_json::Error),
}

/// Lists accounts and the running, billable resources inside them
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    /// All accounts registered with the platform
    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, InventoryError>;

    /// Running, billable resources in one account
    async fn list_running_resources(
        &self,
        account: &AccountInfo,
    ) -> Result<Vec<ResourceInfo>, InventoryError>;

    /// Look up a single resource by id
    async fn get_resource(&self, resource_id: &str) -> Result<ResourceInfo, InventoryError>;
}

/// Resolves pricing facts for a resource
#[async_trait]
pub trait PricingSource: Send + Sync {
    async fn pricing_for(&self, resource: &ResourceInfo) -> Result<PricingInfo, InventoryError>;
}

/// Resolves usage metrics for a resource
///
/// Implementations may return estimates when live telemetry is
/// unavailable; the simulator treats the numbers as supplied facts either
/// way, so estimates must be deterministic.
#[async_trait]
pub trait UsageSource: Send + Sync {
    async fn usage_for(&self, resource: &ResourceInfo) -> Result<UsageMetrics, InventoryError>;
}

/// Deterministic fallback when a resource has no recorded usage metrics
fn default_usage() -> UsageMetrics {
    UsageMetrics {
        avg: 50.0,
        p95: 75.0,
        p99: 90.0,
        idle_ratio: 0.3,
        schedule_pattern: "unknown".to_string(),
        uptime_days: 30,
    }
}

/// One resource entry in the fixture file
#[derive(Debug, Clone, Deserialize)]
struct FixtureEntry {
    account_id: String,
    resource: ResourceInfo,
    pricing: PricingInfo,
    #[serde(default)]
    usage: Option<UsageMetrics>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureFile {
    accounts: Vec<AccountInfo>,
    resources: Vec<FixtureEntry>,
}

/// In-memory inventory backing all three collaborator traits
///
/// Keyed by resource id; safe for concurrent readers and writers.
#[derive(Default)]
pub struct StaticInventory {
    accounts: DashMap<String, AccountInfo>,
    resources: DashMap<String, (String, ResourceInfo)>,
    pricing: DashMap<String, PricingInfo>,
    usage: DashMap<String, UsageMetrics>,
}

impl StaticInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load accounts and resources from a JSON fixture file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let fixture: FixtureFile = serde_json::from_str(&content)?;

        let inventory = Self::new();
        for account in fixture.accounts {
            inventory.add_account(account);
        }
        for entry in fixture.resources {
            inventory.add_resource(&entry.account_id, entry.resource, entry.pricing, entry.usage);
        }
        info!(
            path = %path.as_ref().display(),
            accounts = inventory.accounts.len(),
            resources = inventory.resources.len(),
            "Loaded inventory fixture"
        );
        Ok(inventory)
    }

    pub fn add_account(&self, account: AccountInfo) {
        debug!(account_id = %account.account_id, provider = %account.provider, "Registering account");
        self.accounts.insert(account.account_id.clone(), account);
    }

    /// Register a resource under an account, with pricing and optional usage
    pub fn add_resource(
        &self,
        account_id: &str,
        resource: ResourceInfo,
        pricing: PricingInfo,
        usage: Option<UsageMetrics>,
    ) {
        let id = resource.id.clone();
        self.resources
            .insert(id.clone(), (account_id.to_string(), resource));
        self.pricing.insert(id.clone(), pricing);
        if let Some(usage) = usage {
            self.usage.insert(id, usage);
        }
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

#[async_trait]
impl ResourceDiscovery for StaticInventory {
    async fn list_accounts(&self) -> Result<Vec<AccountInfo>, InventoryError> {
        let mut accounts: Vec<AccountInfo> = self
            .accounts
            .iter()
            .filter(|a| a.value().active)
            .map(|a| a.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        Ok(accounts)
    }

    async fn list_running_resources(
        &self,
        account: &AccountInfo,
    ) -> Result<Vec<ResourceInfo>, InventoryError> {
        let mut resources: Vec<ResourceInfo> = self
            .resources
            .iter()
            .filter(|r| r.value().0 == account.account_id)
            .map(|r| r.value().1.clone())
            .collect();
        resources.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(resources)
    }

    async fn get_resource(&self, resource_id: &str) -> Result<ResourceInfo, InventoryError> {
        self.resources
            .get(resource_id)
            .map(|r| r.value().1.clone())
            .ok_or_else(|| InventoryError::UnknownResource(resource_id.to_string()))
    }
}

#[async_trait]
impl PricingSource for StaticInventory {
    async fn pricing_for(&self, resource: &ResourceInfo) -> Result<PricingInfo, InventoryError> {
        self.pricing
            .get(&resource.id)
            .map(|p| p.value().clone())
            .ok_or_else(|| InventoryError::MissingPricing(resource.id.clone()))
    }
}

#[async_trait]
impl UsageSource for StaticInventory {
    async fn usage_for(&self, resource: &ResourceInfo) -> Result<UsageMetrics, InventoryError> {
        // Missing telemetry degrades to a deterministic estimate
        Ok(self
            .usage
            .get(&resource.id)
            .map(|u| u.value().clone())
            .unwrap_or_else(default_usage))
    }
}
