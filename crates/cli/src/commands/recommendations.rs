//! Recommendation CLI command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, RecommendationList};
use crate::output::{color_risk, color_savings, print_warning, OutputFormat};

/// Row for the recommendations table
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Est. Savings")]
    savings: String,
    #[tabled(rename = "Risk")]
    risk: String,
}

/// Fetch and render the top recommendations
pub async fn get_recommendations(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: RecommendationList = client.get("api/v1/recommendations").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.recommendations)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.recommendations.is_empty() {
                print_warning("No recommendations available");
                return Ok(());
            }

            let rows: Vec<RecommendationRow> = result
                .recommendations
                .iter()
                .enumerate()
                .map(|(i, r)| RecommendationRow {
                    rank: i + 1,
                    action: r.action_type_code.clone(),
                    title: r.title.clone(),
                    savings: color_savings(r.estimated_savings),
                    risk: color_risk(r.scenario.risk_score),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            let total: f64 = result
                .recommendations
                .iter()
                .map(|r| r.estimated_savings)
                .sum();
            println!(
                "\n{} {}/month across {} recommendations",
                "Total estimated savings:".bold(),
                format!("${:.2}", total).green().bold(),
                result.total
            );
        }
    }

    Ok(())
}
