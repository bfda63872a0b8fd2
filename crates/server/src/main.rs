//! Optimizer server - cost simulation and recommendation API
//!
//! Loads the rule catalog once at startup, wires the inventory
//! collaborators, and serves the simulation API.

use anyhow::Result;
use optimizer_lib::{
    health::{components, HealthRegistry},
    inventory::StaticInventory,
    observability::{SimulatorMetrics, StructuredLogger},
    ranker::RecommendationRanker,
    rules::RuleCatalog,
    simulator::Simulator,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting optimizer-server");

    // Load configuration
    let config = config::ServerConfig::load()?;
    info!(instance = %config.instance_name, rules_dir = %config.rules_dir, "Server configured");

    let metrics = SimulatorMetrics::new();
    let logger = StructuredLogger::new(&config.instance_name);
    logger.log_startup(SERVER_VERSION);

    // The catalog is built exactly once and shared read-only from here on
    let catalog = Arc::new(RuleCatalog::load_dir(&config.rules_dir));
    metrics.set_rules_loaded(catalog.len() as i64);
    logger.log_catalog_loaded(catalog.len());

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::RULE_CATALOG).await;
    health_registry.register(components::INVENTORY).await;
    health_registry.register(components::SIMULATOR).await;
    if catalog.is_empty() {
        health_registry
            .set_degraded(components::RULE_CATALOG, "No rule documents loaded")
            .await;
    }

    // Inventory collaborators; a fixture stands in for provider SDK clients
    let inventory = Arc::new(match &config.inventory_file {
        Some(path) => match StaticInventory::from_file(path) {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(path = %path, error = %e, "Inventory fixture unusable, starting empty");
                health_registry
                    .set_degraded(components::INVENTORY, "Inventory fixture unusable")
                    .await;
                StaticInventory::new()
            }
        },
        None => {
            warn!("No inventory configured, discovery will find nothing");
            StaticInventory::new()
        }
    });

    let simulator = Arc::new(Simulator::new(
        catalog.clone(),
        inventory.clone(),
        inventory.clone(),
        inventory.clone(),
    ));
    let ranker = Arc::new(RecommendationRanker::new(
        catalog,
        inventory.clone(),
        inventory.clone(),
        inventory,
    ));

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        health_registry.clone(),
        logger.clone(),
        simulator,
        ranker,
    ));

    // Mark server as ready after initialization
    health_registry.set_ready(true).await;

    // Start the API server
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}
