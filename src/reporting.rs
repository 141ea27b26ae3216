//! Reporting service client
//!
//! [`ReportingService`] is the narrow seam the command depends on: one
//! batched report call returning printable rows. [`GoogleReportingClient`]
//! implements it against the Analytics Reporting API v4, and
//! [`GoogleConnector`] builds one from a service-account key file.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::auth::ServiceAccountKey;
use crate::config::ReportingConfig;
use crate::models::{GetReportsRequest, GetReportsResponse, ReportRequest, ReportRow};

#[async_trait]
pub trait ReportingService: Send + Sync {
    /// Run a single report request and return its rows in service order.
    async fn batch_get(&self, request: ReportRequest) -> Result<Vec<ReportRow>>;
}

/// Creates an authenticated reporting client from a credential file.
#[async_trait]
pub trait ReportingConnector: Send + Sync {
    async fn connect(&self, key_file: &Path, scope: &str) -> Result<Box<dyn ReportingService>>;
}

pub struct GoogleReportingClient {
    http: Client,
    endpoint: String,
    access_token: String,
}

impl GoogleReportingClient {
    pub fn new(http: Client, endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl ReportingService for GoogleReportingClient {
    async fn batch_get(&self, request: ReportRequest) -> Result<Vec<ReportRow>> {
        let view_id = request.view_id.clone();
        let body = GetReportsRequest::from(request);

        debug!(endpoint = %self.endpoint, view_id = %view_id, "Sending batchGet request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .context("Failed to reach reporting API")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("{}", api_error_message(status, &text));
        }

        let parsed: GetReportsResponse = response
            .json()
            .await
            .context("Failed to parse reporting API response")?;

        let rows = parsed.into_rows()?;
        info!(view_id = %view_id, rows = rows.len(), "Report received");
        Ok(rows)
    }
}

/// Pull the `error.message` field out of a Google API error body, falling
/// back to the raw body.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    format!("Reporting API returned {}: {}", status, message)
}

/// Connector for the production API.
pub struct GoogleConnector {
    endpoint: String,
    timeout: Duration,
}

impl GoogleConnector {
    pub fn new(config: &ReportingConfig) -> Self {
        Self {
            endpoint: config.api_endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl ReportingConnector for GoogleConnector {
    async fn connect(&self, key_file: &Path, scope: &str) -> Result<Box<dyn ReportingService>> {
        let key = ServiceAccountKey::from_file(key_file)?;

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let access_token = key.fetch_access_token(&http, scope).await?;

        Ok(Box::new(GoogleReportingClient::new(
            http,
            self.endpoint.clone(),
            access_token,
        )))
    }
}
