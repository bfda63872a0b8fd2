//! Rule catalog CLI command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, RuleList};
use crate::output::{print_warning, OutputFormat};

/// Row for the rules table
#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Rule ID")]
    rule_id: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Approval")]
    approval: String,
    #[tabled(rename = "Formula")]
    formula: String,
}

/// Fetch and render the loaded optimization rules
pub async fn get_rules(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: RuleList = client.get("api/v1/rules").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.rules)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if result.rules.is_empty() {
                print_warning("No rules loaded on the server");
                return Ok(());
            }

            let rows: Vec<RuleRow> = result
                .rules
                .iter()
                .map(|r| RuleRow {
                    rule_id: r.rule_id.clone(),
                    action: r.action_type.to_uppercase(),
                    scope: r.scope.clone(),
                    approval: if r.approval_required {
                        "required".to_string()
                    } else {
                        "auto".to_string()
                    },
                    formula: truncate(&r.estimate_formula, 48),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} rules", result.total);
        }
    }

    Ok(())
}

/// Truncate long formulas for table display
fn truncate(text: &str, max: usize) -> String {
    if text.len() > max {
        format!("{}...", &text[..max])
    } else {
        text.to_string()
    }
}
