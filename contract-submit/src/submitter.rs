use async_trait::async_trait;
use contract_core::Submission;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Webhook URL not configured. Please set the webhook URL in the configuration.")]
    NotConfigured,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Webhook request failed: {0}")]
    Transport(String),

    #[error("Invalid webhook response: {0}")]
    InvalidResponse(String),
}

/// A successful submission: the 2xx status and the JSON body returned.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub status: u16,
    pub body: Value,
}

/// Delivers an exported contract to the document workflow.
///
/// One attempt per call; implementations do not retry.
#[async_trait]
pub trait ContractSubmitter: Send + Sync {
    async fn submit(
        &self,
        submission: &Submission,
    ) -> Result<SubmitReceipt, SubmitError>;
}
