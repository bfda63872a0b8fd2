//! Optimizer library for multi-cloud cost simulation
//!
//! This crate provides the core functionality for:
//! - Cost arithmetic (baseline, commitment, storage-lifecycle savings)
//! - What-if scenario generation per optimization action
//! - Cross-provider recommendation ranking
//! - Declarative optimization rule catalog
//! - Health checks and observability

pub mod cost;
pub mod health;
pub mod inventory;
pub mod models;
pub mod observability;
pub mod ranker;
pub mod rules;
pub mod simulator;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{SimulatorMetrics, StructuredLogger};
pub use ranker::RecommendationRanker;
pub use rules::{RuleCatalog, UcasRule};
pub use simulator::{SimulateRequest, SimulateResponse, Simulator};
