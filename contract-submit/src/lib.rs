pub mod submitter;
pub mod webhook;

pub use submitter::{ContractSubmitter, SubmitError, SubmitReceipt};
pub use webhook::WebhookSubmitter;
