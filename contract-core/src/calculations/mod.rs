//! Contract calculation modules.
//!
//! This module provides the pricing engine and the numeric primitives it is
//! built from: cent rounding, tolerant number parsing, currency formatting
//! and the monthly payment estimate.

pub mod amortization;
pub mod common;
pub mod engine;

pub use amortization::{AmortizationTerms, AmortizationTermsError};
pub use engine::{
    COBUYER_SECTION_FIELDS, ContractCalculator, LineItemError, TAXED_TEMPLATES, compute_totals,
};
