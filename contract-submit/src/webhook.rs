use std::time::Duration;

use async_trait::async_trait;
use contract_core::Submission;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{error, info};

use crate::submitter::{ContractSubmitter, SubmitError, SubmitReceipt};

/// Posts submissions as a JSON body to a workflow webhook.
///
/// An empty URL is accepted at construction so that an unconfigured
/// deployment still calculates; submitting then fails with
/// [`SubmitError::NotConfigured`] without making a request.
#[derive(Debug, Clone)]
pub struct WebhookSubmitter {
    client: reqwest::Client,
    url: String,
}

impl WebhookSubmitter {
    /// Builds a submitter for `url` whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[async_trait]
impl ContractSubmitter for WebhookSubmitter {
    async fn submit(
        &self,
        submission: &Submission,
    ) -> Result<SubmitReceipt, SubmitError> {
        if !self.is_configured() {
            error!("webhook URL not configured; submission skipped");
            return Err(SubmitError::NotConfigured);
        }

        info!(url = %self.url, fields = submission.len(), "submitting contract");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "webhook request failed");
                SubmitError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(url = %self.url, status = status.as_u16(), "webhook rejected submission");
            return Err(SubmitError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;

        info!(status = status.as_u16(), "contract submitted");
        Ok(SubmitReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
