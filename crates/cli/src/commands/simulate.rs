//! Simulation CLI command

use anyhow::{bail, Result};
use tabled::Tabled;

use crate::client::{ApiClient, SimulateRequest, SimulateResponse};
use crate::output::{color_confidence, color_risk, color_savings, format_usd, print_warning, OutputFormat};

/// Known action names accepted on the command line
const ACTIONS: &[&str] = &["offhours", "commitment", "storage", "rightsizing", "cleanup"];

/// Optional parameter overrides collected from CLI flags
#[derive(Debug, Default)]
pub struct ParamOverrides {
    pub stop_at: Option<String>,
    pub start_at: Option<String>,
    pub timezone: Option<String>,
    pub commit_years: Option<u32>,
    pub target_tier: Option<String>,
    pub retention_days: Option<u32>,
}

impl ParamOverrides {
    /// Build the sparse params object; server-side defaults fill the rest
    fn to_json(&self) -> Option<serde_json::Value> {
        let mut params = serde_json::Map::new();
        if let Some(v) = &self.stop_at {
            params.insert("stop_at".into(), v.clone().into());
        }
        if let Some(v) = &self.start_at {
            params.insert("start_at".into(), v.clone().into());
        }
        if let Some(v) = &self.timezone {
            params.insert("timezone".into(), v.clone().into());
        }
        if let Some(v) = self.commit_years {
            params.insert("commit_years".into(), v.into());
        }
        if let Some(v) = &self.target_tier {
            params.insert("target_tier".into(), v.clone().into());
        }
        if let Some(v) = self.retention_days {
            params.insert("retention_days".into(), v.into());
        }
        if params.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(params))
        }
    }
}

/// Row for the scenario table
#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "New")]
    new: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

/// Run a simulation and render the scenarios
pub async fn run_simulation(
    client: &ApiClient,
    resources: Vec<String>,
    action: &str,
    overrides: ParamOverrides,
    format: OutputFormat,
) -> Result<()> {
    let action = action.to_lowercase();
    if !ACTIONS.contains(&action.as_str()) {
        bail!("Unknown action '{}', expected one of: {}", action, ACTIONS.join(", "));
    }

    let request = SimulateRequest {
        resource_ids: resources,
        action,
        params: overrides.to_json(),
    };

    let result: SimulateResponse = client.post("api/v1/simulate", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.scenarios.is_empty() {
                print_warning("No scenarios produced (resources may be ineligible for this action)");
                return Ok(());
            }

            let rows: Vec<ScenarioRow> = result
                .scenarios
                .iter()
                .map(|s| ScenarioRow {
                    scenario: s.scenario_name.clone(),
                    current: format_usd(s.current_cost),
                    new: format_usd(s.new_cost),
                    savings: color_savings(s.savings),
                    risk: color_risk(s.risk_score),
                    confidence: color_confidence(s.confidence),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!(
                "\n{} scenarios across {} resources ({})",
                result.scenarios.len(),
                result.total_resources,
                result.action_type_code
            );
        }
    }

    Ok(())
}
