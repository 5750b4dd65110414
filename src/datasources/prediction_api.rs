use crate::config::PredictionConfig;
use crate::error::{CropYieldError, Result};
use crate::logic::PredictionService;
use crate::models::{PredictionRequest, PredictionResult};
use serde_json::Value;
use std::time::Duration;

/// Name of the yield field in the service's response body.
const YIELD_FIELD: &str = "predicted_yield";

pub struct PredictionClient {
    client: reqwest::Client,
    config: PredictionConfig,
}

impl PredictionClient {
    pub fn new(config: PredictionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// POST the request and extract the predicted yield.
    pub async fn fetch_prediction(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        tracing::debug!(endpoint = %self.config.endpoint, "POST prediction request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = server_message(&body)
                .unwrap_or_else(|| format!("Prediction service returned {}", status));
            return Err(CropYieldError::Transport(message));
        }

        parse_yield(&body)
    }

    /// Test connection to the service root.
    pub async fn test_connection(&self) -> Result<bool> {
        let mut url = reqwest::Url::parse(&self.config.endpoint)
            .map_err(|e| CropYieldError::Config(format!("invalid prediction endpoint: {}", e)))?;
        url.set_path("/");
        url.set_query(None);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(response.status().is_success())
    }

    fn transport_error(&self, e: reqwest::Error) -> CropYieldError {
        if e.is_timeout() {
            CropYieldError::Transport(format!(
                "Prediction service did not respond within {}s",
                self.config.timeout_secs
            ))
        } else {
            CropYieldError::Transport(format!("Could not reach the prediction service: {}", e))
        }
    }
}

impl PredictionService for PredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.fetch_prediction(request).await
    }
}

/// Error text supplied by the server, from a `detail` or `message` field.
fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    let message = match json.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        // Request validation errors come back as a list of {loc, msg, type}
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => json.get("message").and_then(Value::as_str)?.to_string(),
    };

    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(format!("Prediction service error: {}", message))
    }
}

fn parse_yield(body: &str) -> Result<PredictionResult> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        CropYieldError::MalformedResponse(format!(
            "Prediction service returned an unreadable response: {}",
            e
        ))
    })?;

    json.get(YIELD_FIELD)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(PredictionResult::new)
        .ok_or_else(|| {
            CropYieldError::MalformedResponse(format!(
                "Prediction service response has no numeric `{}`",
                YIELD_FIELD
            ))
        })
}
