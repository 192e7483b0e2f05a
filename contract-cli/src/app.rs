use contract_core::{ContractCalculator, FormattedTotals, ValidationReport};
use contract_submit::{ContractSubmitter, SubmitError, SubmitReceipt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::loader::{FieldLoader, FieldRecord};

const SALES_TAX_FIELD: &str = "salestax_price";

#[derive(Debug, Error)]
pub enum SubmitContractError {
    #[error("contract is incomplete: {} required field(s) missing", .0.errors.len())]
    Invalid(ValidationReport),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Seeds the form defaults from `config` before any captured values.
///
/// The configured sales tax rate fills `salestax_price` unless the
/// `[defaults]` table already names it.
pub fn seed_defaults(
    calculator: &mut ContractCalculator,
    config: &AppConfig,
) {
    if !config.defaults.contains_key(SALES_TAX_FIELD) {
        calculator.set_field(
            SALES_TAX_FIELD,
            config.finance.default_sales_tax_rate.normalize().to_string(),
        );
    }
    for (field, value) in &config.defaults {
        calculator.set_field(field, value.as_str());
    }
    debug!(defaults = config.defaults.len(), "seeded form defaults");
}

/// A calculator with the configured terms, defaults and then `records` applied.
pub fn build_calculator(
    config: &AppConfig,
    records: &[FieldRecord],
) -> ContractCalculator {
    let mut calculator = ContractCalculator::new(config.amortization_terms());
    seed_defaults(&mut calculator, config);
    FieldLoader::apply(&mut calculator, records);
    calculator
}

/// The financial summary as an aligned two-column table.
pub fn render_totals(totals: &FormattedTotals) -> String {
    let rows = totals.rows();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| format!("{label:<label_width$}  {value:>value_width$}\n"))
        .collect()
}

/// Validates the contract and, when complete, hands its export to `submitter`.
///
/// # Errors
///
/// Returns [`SubmitContractError::Invalid`] without contacting the submitter
/// when required fields are missing, or [`SubmitContractError::Submit`] when
/// the submission itself fails.
pub async fn submit_contract(
    calculator: &ContractCalculator,
    submitter: &dyn ContractSubmitter,
) -> Result<SubmitReceipt, SubmitContractError> {
    let report = calculator.validate();
    if !report.is_valid {
        warn!(missing = report.missing_fields.len(), "contract failed validation");
        return Err(SubmitContractError::Invalid(report));
    }

    let submission = calculator.export_for_submission();
    let receipt = submitter.submit(&submission).await?;
    info!(status = receipt.status, "contract accepted");
    Ok(receipt)
}
