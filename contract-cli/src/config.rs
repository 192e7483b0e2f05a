//! Application configuration loaded from a TOML file.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [webhook]
//! url = "https://example.com/webhook/contract"
//! timeout_secs = 30
//!
//! [finance]
//! default_interest_rate = 0.049
//! default_loan_term = 5
//! default_sales_tax_rate = 6.625
//!
//! [defaults]
//! docfee_amount = "499"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contract_core::{AmortizationTerms, AmortizationTermsError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid finance settings: {0}")]
    Finance(#[from] AmortizationTermsError),

    #[error("default sales tax rate must be non-negative, got {0}")]
    NegativeSalesTaxRate(Decimal),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint that receives the submission. Empty means not configured.
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// Annual rate as a fraction, used for the monthly payment estimate.
    pub default_interest_rate: Decimal,
    /// Loan term in years, used for the monthly payment estimate.
    pub default_loan_term: u32,
    /// Percentage seeded into `salestax_price` before any user input.
    pub default_sales_tax_rate: Decimal,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        let terms = AmortizationTerms::default();
        Self {
            default_interest_rate: terms.annual_rate,
            default_loan_term: terms.term_years,
            default_sales_tax_rate: dec!(6.625),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub webhook: WebhookConfig,
    pub finance: FinanceConfig,
    /// Form defaults applied before any loaded field values.
    pub defaults: BTreeMap<String, String>,
}

impl AppConfig {
    /// Reads and validates the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates config text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.amortization_terms().validate()?;
        if self.finance.default_sales_tax_rate < Decimal::ZERO {
            return Err(ConfigError::NegativeSalesTaxRate(
                self.finance.default_sales_tax_rate,
            ));
        }
        Ok(())
    }

    /// Rate and term handed to the calculator.
    pub fn amortization_terms(&self) -> AmortizationTerms {
        AmortizationTerms {
            annual_rate: self.finance.default_interest_rate,
            term_years: self.finance.default_loan_term,
        }
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook.timeout_secs)
    }
}
