//! Declarative optimization rule catalog
//!
//! Rule documents (`*.rule.json`, one action type per file) are scanned once
//! at startup and indexed by action type. The catalog is immutable after
//! construction and shared behind an `Arc`, so concurrent readers need no
//! locking. Loading never fails: a malformed document is logged and skipped,
//! and total load failure leaves an empty catalog.

use crate::models::{ActionType, ScenarioParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// File suffix a rule document must carry to be picked up by the scan
pub const RULE_FILE_SUFFIX: &str = ".rule.json";

/// Errors raised while parsing a single rule document
#[derive(Debug, Error)]
pub enum RuleParseError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rule document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// On-disk shape of a rule document
#[derive(Debug, Clone, Deserialize)]
struct RuleDocument {
    rule_id: String,
    action: ActionType,
    scope: String,
    #[serde(default)]
    r#match: HashMap<String, Value>,
    #[serde(default)]
    params: HashMap<String, Value>,
    estimate: EstimateSection,
}

#[derive(Debug, Clone, Deserialize)]
struct EstimateSection {
    /// Human-readable formula; documentation only, never executed
    formula: String,
    #[serde(default)]
    approval: bool,
}

/// A loaded optimization rule
#[derive(Debug, Clone, Serialize)]
pub struct UcasRule {
    pub rule_id: String,
    pub action_type: ActionType,
    pub scope: String,
    pub match_criteria: HashMap<String, Value>,
    pub params: HashMap<String, Value>,
    pub estimate_formula: String,
    pub approval_required: bool,
}

impl From<RuleDocument> for UcasRule {
    fn from(doc: RuleDocument) -> Self {
        Self {
            rule_id: doc.rule_id,
            action_type: doc.action,
            scope: doc.scope,
            match_criteria: doc.r#match,
            params: doc.params,
            estimate_formula: doc.estimate.formula,
            approval_required: doc.estimate.approval,
        }
    }
}

/// Immutable catalog of optimization rules keyed by action type
#[derive(Debug, Default)]
pub struct RuleCatalog {
    rules: HashMap<ActionType, UcasRule>,
}

impl RuleCatalog {
    /// Catalog with no rules (the degraded-but-valid fallback state)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan a directory for `*.rule.json` documents and build the catalog.
    ///
    /// Files are visited in lexicographic name order; when two documents
    /// declare the same action type the later file wins and the collision
    /// is surfaced as a warning. Unreadable or malformed documents are
    /// skipped. This function never fails.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut rules: HashMap<ActionType, UcasRule> = HashMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Rule directory unreadable, catalog left empty");
                return Self::empty();
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(RULE_FILE_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        for path in paths {
            match Self::parse_file(&path) {
                Ok(rule) => {
                    debug!(rule_id = %rule.rule_id, action = %rule.action_type, "Loaded rule");
                    if let Some(previous) = rules.insert(rule.action_type, rule) {
                        let winner = &rules[&previous.action_type];
                        warn!(
                            action = %previous.action_type,
                            replaced = %previous.rule_id,
                            winner = %winner.rule_id,
                            file = %path.display(),
                            "Duplicate rule for action type, later file wins"
                        );
                    }
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping invalid rule document");
                }
            }
        }

        info!(count = rules.len(), dir = %dir.display(), "Rule catalog loaded");
        Self { rules }
    }

    fn parse_file(path: &Path) -> Result<UcasRule, RuleParseError> {
        let content = std::fs::read_to_string(path)?;
        let doc: RuleDocument = serde_json::from_str(&content)?;
        Ok(doc.into())
    }

    /// Rule registered for an action type, if any
    pub fn get_rule(&self, action: ActionType) -> Option<&UcasRule> {
        self.rules.get(&action)
    }

    /// Read-only view of every loaded rule
    pub fn all_rules(&self) -> impl Iterator<Item = &UcasRule> {
        self.rules.values()
    }

    /// Number of loaded rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule document loaded successfully
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Human-readable justification for a scenario.
    ///
    /// Assembled from the registered rule's match criteria and parameters;
    /// falls back to a generic (but never empty) message when no rule is
    /// registered for the action type.
    pub fn generate_basis_description(
        &self,
        action: ActionType,
        savings: f64,
        params: &ScenarioParams,
    ) -> String {
        match self.rules.get(&action) {
            Some(rule) => {
                let criteria = format_mapping(&rule.match_criteria);
                let rule_params = format_mapping(&rule.params);
                format!(
                    "Rule {} ({} scope) matched on {}; params: {}; projected savings ${:.2}/month",
                    rule.rule_id, rule.scope, criteria, rule_params, savings
                )
            }
            None => format!(
                "No optimization rule registered for {}; applying default heuristics \
                 (schedule {}-{} {}, projected savings ${:.2}/month)",
                action, params.stop_at, params.start_at, params.timezone, savings
            ),
        }
    }
}

/// Render a criteria/params mapping as "k=v, k=v" with stable ordering
fn format_mapping(map: &HashMap<String, Value>) -> String {
    if map.is_empty() {
        return "(none)".to_string();
    }
    let mut keys: Vec<_> = map.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| {
            let v = &map[*k];
            match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
