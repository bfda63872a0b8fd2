//! API client for communicating with the optimizer server

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the optimizer server
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API request/response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub resource_ids: Vec<String>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationScenario {
    pub scenario_name: String,
    pub current_cost: f64,
    pub new_cost: f64,
    pub savings: f64,
    pub risk_score: f64,
    pub priority_score: f64,
    pub confidence: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub scenarios: Vec<SimulationScenario>,
    pub action_type_code: String,
    pub total_resources: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub estimated_savings: f64,
    pub action_type_code: String,
    pub scenario: SimulationScenario,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    pub action_type: String,
    pub scope: String,
    #[serde(default)]
    pub match_criteria: serde_json::Value,
    #[serde(default)]
    pub params: serde_json::Value,
    pub estimate_formula: String,
    pub approval_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleList {
    pub rules: Vec<Rule>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_recommendations_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/recommendations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "total": 1,
                    "recommendations": [{
                        "title": "Save $12/month with an off-hours schedule",
                        "description": "Stop i-1 daily",
                        "estimated_savings": 11.6,
                        "action_type_code": "OFFHOURS",
                        "scenario": {
                            "scenario_name": "offhours-i-1-20:00-08:30",
                            "current_cost": 30.37, "new_cost": 18.77, "savings": 11.6,
                            "risk_score": 0.3, "priority_score": 4.06,
                            "confidence": 0.75, "description": "Stop i-1 daily"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let list: RecommendationList = client.get("api/v1/recommendations").await.unwrap();

        mock.assert_async().await;
        assert_eq!(list.total, 1);
        assert_eq!(list.recommendations[0].action_type_code, "OFFHOURS");
    }

    #[tokio::test]
    async fn test_api_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/simulate")
            .with_status(400)
            .with_body(r#"{"error": "resource_ids must not be empty"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let request = SimulateRequest {
            resource_ids: Vec::new(),
            action: "offhours".to_string(),
            params: None,
        };
        let result: Result<SimulateResponse> = client.post("api/v1/simulate", &request).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("400"));
    }
}
