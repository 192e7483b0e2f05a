pub mod calculations;
pub mod export;
pub mod models;
pub mod validation;

pub use calculations::{AmortizationTerms, AmortizationTermsError, ContractCalculator, LineItemError};
pub use export::Submission;
pub use models::*;
pub use validation::ValidationReport;
