//! Estimated monthly payment for a fixed-rate installment contract.
//!
//! The payment is the standard annuity formula
//!
//! ```text
//! payment = P × i(1+i)^k / ((1+i)^k − 1)
//! ```
//!
//! where `i` is the monthly rate (annual rate / 12) and `k` the number of
//! monthly payments (term in years × 12). Only the single estimated
//! payment is produced; there is no schedule.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use contract_core::calculations::AmortizationTerms;
//!
//! let terms = AmortizationTerms::default(); // 4.9% over 5 years
//!
//! assert_eq!(terms.monthly_payment(dec!(19857.06)), dec!(373.82));
//! assert_eq!(terms.monthly_payment(dec!(0)), dec!(0));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;

/// Errors that can occur when validating amortization terms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmortizationTermsError {
    /// The annual interest rate must be non-negative.
    #[error("annual interest rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    /// The loan term must be at least one year.
    #[error("loan term must be at least one year, got {0}")]
    InvalidTerm(u32),
}

/// Rate and term used for the monthly payment estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationTerms {
    /// Annual interest rate as a fraction (`0.049` for 4.9%).
    pub annual_rate: Decimal,

    /// Loan term in whole years.
    pub term_years: u32,
}

impl Default for AmortizationTerms {
    fn default() -> Self {
        Self {
            annual_rate: dec!(0.049),
            term_years: 5,
        }
    }
}

impl AmortizationTerms {
    /// Validates the terms.
    ///
    /// # Errors
    ///
    /// Returns [`AmortizationTermsError`] if the rate is negative or the term is zero.
    pub fn validate(&self) -> Result<(), AmortizationTermsError> {
        if self.annual_rate < Decimal::ZERO {
            return Err(AmortizationTermsError::NegativeRate(self.annual_rate));
        }
        if self.term_years == 0 {
            return Err(AmortizationTermsError::InvalidTerm(self.term_years));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / dec!(12)
    }

    pub fn payment_count(&self) -> u64 {
        u64::from(self.term_years) * 12
    }

    /// Estimated monthly payment on `principal`, rounded to the cent.
    ///
    /// Returns zero when the principal or the monthly rate is zero or
    /// negative, and when the computation overflows.
    pub fn monthly_payment(
        &self,
        principal: Decimal,
    ) -> Decimal {
        let monthly_rate = self.monthly_rate();
        if principal <= Decimal::ZERO || monthly_rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        match self.annuity_factor(monthly_rate) {
            Some(factor) => round_half_up(principal.saturating_mul(factor)),
            None => {
                warn!(
                    principal = %principal,
                    annual_rate = %self.annual_rate,
                    term_years = self.term_years,
                    "Monthly payment computation overflowed; reporting zero"
                );
                Decimal::ZERO
            }
        }
    }

    /// `i(1+i)^k / ((1+i)^k − 1)`, or `None` if it cannot be represented.
    fn annuity_factor(
        &self,
        monthly_rate: Decimal,
    ) -> Option<Decimal> {
        let growth = (Decimal::ONE + monthly_rate).checked_powu(self.payment_count())?;
        let numerator = monthly_rate.checked_mul(growth)?;
        numerator.checked_div(growth - Decimal::ONE)
    }
}
