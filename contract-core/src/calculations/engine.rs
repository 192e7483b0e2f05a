//! Contract pricing engine.
//!
//! [`ContractCalculator`] owns the raw form values and the totals derived
//! from them. Every write triggers a full recompute; there is no
//! incremental update and no dependency tracking.
//!
//! # Computation Order
//!
//! Each monetary line is rounded to the cent before it feeds a later line:
//!
//! | Line | Total | Computation |
//! |------|-------|-------------|
//! | 1    | Car price, trade-in, deposit, down payment, doc fee, LoJack fee | parsed field, rounded |
//! | 1a   | Sales tax rate | parsed `salestax_price`, not rounded |
//! | 2    | Total accessories | sum of accessories amounts, rounded once |
//! | 3    | Dynamic services | sum of services amounts, rounded once |
//! | 3a   | Total service contract | doc fee + LoJack fee + Line 3 |
//! | 4    | Trade difference | car price − trade-in (may be negative) |
//! | 5    | Subtotal | Line 4 + Line 2 + Line 3a |
//! | 6    | Sales tax | Line 5 × rate / 100 for NJ, NY and PA templates, else 0 |
//! | 7    | Balance due | Line 5 − down payment + Line 6 |
//! | 8    | Monthly payment | amortized Line 7 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use contract_core::ContractCalculator;
//!
//! let mut calculator = ContractCalculator::default();
//! calculator.set_field("car_price", "25000");
//! calculator.set_field("tradein_price", "5000");
//! calculator.set_field("down_payment", "2000");
//! calculator.set_field("docfee_amount", "499");
//! calculator.set_field("contract_template", "NJ");
//! let totals = calculator.set_field("salestax_price", "6.625");
//!
//! assert_eq!(totals.subtotal, dec!(20499.00));
//! assert_eq!(totals.sales_tax, dec!(1358.06));
//! assert_eq!(totals.amount_due, dec!(19857.06));
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::amortization::AmortizationTerms;
use crate::calculations::common::{parse_number, round_half_up};
use crate::export::{self, Submission};
use crate::models::{
    CASH_LIEN_TYPE, FieldStore, FieldValue, FormattedTotals, LIEN_HOLDER_FIELDS, LienHolder,
    LineCategory, LineItemKey, TotalsRecord,
};
use crate::validation::{self, TRADEIN_FIELDS, ValidationReport};

/// Contract templates whose jurisdiction charges sales tax.
pub const TAXED_TEMPLATES: [&str; 3] = ["NJ", "NY", "PA"];

/// Co-buyer inputs blanked when the co-buyer section is switched off.
pub const COBUYER_SECTION_FIELDS: [&str; 10] = [
    "cobuyerfull_name",
    "cobuyer_dob",
    "cobuyer_gender",
    "cobuyer_license",
    "cobuyer_address",
    "cobuyer_city",
    "cobuyer_state",
    "cobuyer_zip",
    "cobuyer_cellphone",
    "cobuyer_residencephone",
];

/// Errors from the line item row helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// The category already holds the maximum number of rows.
    #[error("maximum {max} fields allowed for {category}")]
    LimitReached { category: LineCategory, max: usize },

    /// The slot being removed is not present.
    #[error("line item {0} does not exist")]
    NotFound(LineItemKey),
}

/// The calculation engine: current form values plus the totals derived from them.
///
/// `totals` is always consistent with `fields` after any public call returns.
#[derive(Debug, Clone, Default)]
pub struct ContractCalculator {
    fields: FieldStore,
    totals: TotalsRecord,
    terms: AmortizationTerms,
}

impl ContractCalculator {
    /// Creates an empty calculator that estimates payments with `terms`.
    pub fn new(terms: AmortizationTerms) -> Self {
        let mut calculator = Self {
            terms,
            ..Self::default()
        };
        calculator.recompute();
        calculator
    }

    /// Stores one raw field value and recomputes every total.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> &TotalsRecord {
        self.fields.set(name, value.into());
        self.recompute()
    }

    /// Removes one raw field value and recomputes every total.
    pub fn remove_field(
        &mut self,
        name: &str,
    ) -> &TotalsRecord {
        self.fields.remove(name);
        self.recompute()
    }

    /// Rebuilds the totals from the current fields, replacing the previous record.
    pub fn recompute(&mut self) -> &TotalsRecord {
        self.totals = compute_totals(&self.fields, &self.terms);
        debug!(
            fields = self.fields.len(),
            subtotal = %self.totals.subtotal,
            amount_due = %self.totals.amount_due,
            "Recomputed contract totals"
        );
        &self.totals
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn totals(&self) -> &TotalsRecord {
        &self.totals
    }

    pub fn terms(&self) -> &AmortizationTerms {
        &self.terms
    }

    /// Totals rendered as currency for display.
    pub fn formatted_totals(&self) -> FormattedTotals {
        FormattedTotals::from(&self.totals)
    }

    /// Clears every field, leaving the totals of an empty form.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.recompute();
    }

    /// Adds a row to `category` in its lowest free slot, with an empty name
    /// and a zero amount.
    pub fn add_line_item(
        &mut self,
        category: LineCategory,
    ) -> LineItemKey {
        let key = LineItemKey::new(category, self.fields.next_free_slot(category));
        self.fields.set(&key.name_field(), FieldValue::from(""));
        self.fields.set(&key.amount_field(), FieldValue::from("0"));
        self.recompute();
        key
    }

    /// Like [`add_line_item`](Self::add_line_item), but refuses once
    /// `category` already holds `max` rows.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::LimitReached`] when the category is full.
    pub fn add_line_item_within(
        &mut self,
        category: LineCategory,
        max: usize,
    ) -> Result<LineItemKey, LineItemError> {
        if self.fields.line_items(category).count() >= max {
            return Err(LineItemError::LimitReached { category, max });
        }
        Ok(self.add_line_item(category))
    }

    /// Removes a row: its values are zeroed and totals recomputed before the
    /// slot itself is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::NotFound`] when the slot is not present.
    pub fn remove_line_item(
        &mut self,
        key: LineItemKey,
    ) -> Result<&TotalsRecord, LineItemError> {
        if self.fields.line_item(key).is_none() {
            return Err(LineItemError::NotFound(key));
        }
        self.fields.set(&key.name_field(), FieldValue::from(""));
        self.fields.set(&key.amount_field(), FieldValue::from("0"));
        self.recompute();

        self.fields.remove_line_item(key);
        Ok(self.recompute())
    }

    /// Sets `lien_type` and fills the lien holder block to match.
    ///
    /// A known finance company fills in its address; `cash` clears the
    /// block; any other value leaves the block as entered.
    pub fn apply_lien_type(
        &mut self,
        lien_type: &str,
    ) -> &TotalsRecord {
        self.fields.set("lien_type", FieldValue::from(lien_type));

        if let Some(holder) = LienHolder::preset(lien_type) {
            for (field, value) in holder.field_values() {
                self.fields.set(field, FieldValue::from(value));
            }
        } else if lien_type == CASH_LIEN_TYPE {
            for field in LIEN_HOLDER_FIELDS {
                self.fields.set(field, FieldValue::from(""));
            }
        }

        self.recompute()
    }

    /// Sets `cobuyer_toggle`; switching it off blanks every co-buyer input.
    pub fn apply_cobuyer_toggle(
        &mut self,
        on: bool,
    ) -> &TotalsRecord {
        self.apply_section_toggle("cobuyer_toggle", on, &COBUYER_SECTION_FIELDS)
    }

    /// Sets `tradein_toggle`; switching it off blanks the trade-in vehicle
    /// and its price, so the trade-in no longer reduces the deal.
    pub fn apply_tradein_toggle(
        &mut self,
        on: bool,
    ) -> &TotalsRecord {
        self.apply_section_toggle("tradein_toggle", on, &TRADEIN_FIELDS)
    }

    fn apply_section_toggle(
        &mut self,
        toggle: &str,
        on: bool,
        section: &[&str],
    ) -> &TotalsRecord {
        if !on {
            for field in section {
                self.fields.set(field, FieldValue::from(""));
            }
        }
        self.fields.set(toggle, FieldValue::Flag(on));
        self.recompute()
    }

    /// Checks the required fields for submission.
    pub fn validate(&self) -> ValidationReport {
        validation::validate(&self.fields)
    }

    /// The flat record handed to the transport, stamped with the current time.
    pub fn export_for_submission(&self) -> Submission {
        self.export_at(Utc::now())
    }

    /// The flat record handed to the transport, stamped with `calculated_at`.
    pub fn export_at(
        &self,
        calculated_at: DateTime<Utc>,
    ) -> Submission {
        export::build_submission(&self.fields, &self.totals, calculated_at)
    }
}

/// Derives the complete totals record from `fields`.
///
/// Total: any field contents, including malformed numbers, produce a record.
pub fn compute_totals(
    fields: &FieldStore,
    terms: &AmortizationTerms,
) -> TotalsRecord {
    // Line 1: scalar amounts
    let car_price = round_half_up(field_amount(fields, "car_price"));
    let trade_in_value = round_half_up(field_amount(fields, "tradein_price"));
    let deposit_amount = round_half_up(field_amount(fields, "deposit_price"));
    let down_payment = round_half_up(field_amount(fields, "down_payment"));
    let doc_fee = round_half_up(field_amount(fields, "docfee_amount"));
    let lo_jack_fee = round_half_up(field_amount(fields, "lo_jack_amount"));
    let sales_tax_rate = field_amount(fields, "salestax_price");

    // Line 2: accessories
    let dynamic_accessories = round_half_up(line_item_sum(fields, LineCategory::Accessories));
    let total_accessories = dynamic_accessories;

    // Line 3: services
    let dynamic_services = round_half_up(line_item_sum(fields, LineCategory::Services));
    let total_service = round_half_up(
        doc_fee
            .saturating_add(lo_jack_fee)
            .saturating_add(dynamic_services),
    );

    // Line 4: trade difference, not clamped
    let trade_difference = round_half_up(car_price.saturating_sub(trade_in_value));
    if trade_difference < Decimal::ZERO {
        debug!(
            car_price = %car_price,
            trade_in_value = %trade_in_value,
            "Trade-in exceeds car price; trade difference is negative"
        );
    }

    // Line 5: subtotal
    let subtotal = round_half_up(
        trade_difference
            .saturating_add(total_accessories)
            .saturating_add(total_service),
    );

    // Line 6: sales tax
    let sales_tax = sales_tax(fields, subtotal, sales_tax_rate);

    // Line 7: balance due
    let amount_due = round_half_up(
        subtotal
            .saturating_sub(down_payment)
            .saturating_add(sales_tax),
    );

    // Line 8: monthly payment
    let monthly_payment = terms.monthly_payment(amount_due);

    TotalsRecord {
        car_price,
        trade_in_value,
        deposit_amount,
        down_payment,
        doc_fee,
        lo_jack_fee,
        sales_tax_rate,
        dynamic_accessories,
        total_accessories,
        dynamic_services,
        total_service,
        trade_difference,
        subtotal,
        sales_tax,
        amount_due,
        monthly_payment,
    }
}

/// Parsed numeric value of a field; absent fields and flags are zero.
fn field_amount(
    fields: &FieldStore,
    name: &str,
) -> Decimal {
    fields.text(name).map(parse_number).unwrap_or(Decimal::ZERO)
}

/// Unrounded sum of every amount entered for `category`.
fn line_item_sum(
    fields: &FieldStore,
    category: LineCategory,
) -> Decimal {
    fields
        .line_amounts(category)
        .filter_map(FieldValue::as_text)
        .map(parse_number)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sales tax on `subtotal`, charged only for the taxed templates.
fn sales_tax(
    fields: &FieldStore,
    subtotal: Decimal,
    rate: Decimal,
) -> Decimal {
    let template = fields.text("contract_template").unwrap_or_default();
    if !TAXED_TEMPLATES.contains(&template) {
        return Decimal::ZERO;
    }
    round_half_up(subtotal.saturating_mul(rate) / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// Calculator loaded with the reference NJ deal.
    fn nj_deal() -> ContractCalculator {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("car_price", "25000");
        calculator.set_field("tradein_price", "5000");
        calculator.set_field("down_payment", "2000");
        calculator.set_field("docfee_amount", "499");
        calculator.set_field("lo_jack_amount", "0");
        calculator.set_field("contract_template", "NJ");
        calculator.set_field("salestax_price", "6.625");
        calculator
    }

    /// Initializes tracing subscriber for tests that exercise log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn assert_cent_precision(totals: &TotalsRecord) {
        for (name, value) in totals.monetary_entries() {
            assert_eq!(value, round_half_up(value), "{name} has sub-cent precision");
        }
    }

    // =========================================================================
    // end-to-end tests
    // =========================================================================

    #[test]
    fn nj_deal_produces_reference_totals() {
        let calculator = nj_deal();
        let totals = calculator.totals();

        assert_eq!(totals.trade_difference, dec!(20000.00));
        assert_eq!(totals.total_service, dec!(499.00));
        assert_eq!(totals.subtotal, dec!(20499.00));
        assert_eq!(totals.sales_tax, dec!(1358.06));
        assert_eq!(totals.amount_due, dec!(19857.06));
        assert_eq!(totals.monthly_payment, dec!(373.82));
    }

    #[test]
    fn empty_form_yields_zero_totals() {
        let calculator = ContractCalculator::default();

        assert_eq!(calculator.totals(), &TotalsRecord::default());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut calculator = nj_deal();
        let first = calculator.totals().clone();

        let second = calculator.recompute().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn malformed_input_never_prevents_a_record() {
        let _guard = init_test_tracing();
        let mut calculator = ContractCalculator::default();

        for (field, value) in [
            ("car_price", "not a number"),
            ("tradein_price", "79228162514264337593543950335"),
            ("down_payment", "-79228162514264337593543950335"),
            ("docfee_amount", "four hundred"),
            ("salestax_price", "%%"),
            ("accessories_amount_extra_1", "12..5"),
            ("contract_template", "NJ"),
        ] {
            let totals = calculator.set_field(field, value);
            assert_cent_precision(totals);
        }

        assert_eq!(calculator.totals().car_price, Decimal::ZERO);
        assert_eq!(calculator.totals().doc_fee, Decimal::ZERO);
    }

    #[test]
    fn every_total_is_rounded_to_cents() {
        let mut calculator = nj_deal();
        calculator.set_field("car_price", "18999.999");
        calculator.set_field("accessories_amount_extra_1", "33.333");
        calculator.set_field("services_amount_extra_1", "0.005");
        calculator.set_field("salestax_price", "7.125");

        assert_cent_precision(calculator.totals());
    }

    // =========================================================================
    // line 1 tests
    // =========================================================================

    #[test]
    fn sales_tax_rate_is_not_rounded() {
        let mut calculator = ContractCalculator::default();

        let totals = calculator.set_field("salestax_price", "6.625");

        assert_eq!(totals.sales_tax_rate, dec!(6.625));
    }

    #[test]
    fn flags_in_numeric_fields_count_as_zero() {
        let mut calculator = ContractCalculator::default();

        let totals = calculator.set_field("car_price", true);

        assert_eq!(totals.car_price, Decimal::ZERO);
    }

    #[test]
    fn deposit_is_reported_but_not_deducted() {
        let mut calculator = nj_deal();

        let totals = calculator.set_field("deposit_price", "1500.50");

        assert_eq!(totals.deposit_amount, dec!(1500.50));
        assert_eq!(totals.amount_due, dec!(19857.06));
    }

    #[test]
    fn unknown_fields_do_not_affect_totals() {
        let mut calculator = nj_deal();
        let before = calculator.totals().clone();

        let after = calculator.set_field("car_color", "Red").clone();

        assert_eq!(before, after);
    }

    // =========================================================================
    // line 2 / line 3 tests
    // =========================================================================

    #[test]
    fn accessories_are_summed_before_rounding() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("accessories_amount_extra_1", "500");

        let totals = calculator.set_field("accessories_amount_extra_2", "250.555");

        assert_eq!(totals.dynamic_accessories, dec!(750.56));
        assert_eq!(totals.total_accessories, dec!(750.56));
    }

    #[test]
    fn rounding_applies_to_the_sum_not_each_addend() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("accessories_amount_extra_1", "0.004");
        calculator.set_field("accessories_amount_extra_2", "0.004");

        let totals = calculator.set_field("accessories_amount_extra_3", "0.004");

        assert_eq!(totals.total_accessories, dec!(0.01));
    }

    #[test]
    fn unbounded_slots_are_summed() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("services_amount_extra_1", "100");

        let totals = calculator.set_field("services_amount_extra_17", "50");

        assert_eq!(totals.dynamic_services, dec!(150.00));
    }

    #[test]
    fn total_service_includes_fees_and_services() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("docfee_amount", "499");
        calculator.set_field("lo_jack_amount", "695");

        let totals = calculator.set_field("services_amount_extra_1", "1200");

        assert_eq!(totals.dynamic_services, dec!(1200.00));
        assert_eq!(totals.total_service, dec!(2394.00));
    }

    #[test]
    fn zero_padded_and_oversized_slots_are_summed() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("accessories_amount_extra_01", "100");

        let totals = calculator.set_field("accessories_amount_extra_4294967296", "100");

        assert_eq!(totals.dynamic_accessories, dec!(200.00));
        assert_eq!(totals.total_accessories, dec!(200.00));
    }

    #[test]
    fn slot_zero_service_amount_is_summed() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("services_amount_extra_1", "10");

        let totals = calculator.set_field("services_amount_extra_0", "5.25");

        assert_eq!(totals.dynamic_services, dec!(15.25));
    }

    #[test]
    fn line_item_names_do_not_count_toward_totals() {
        let mut calculator = ContractCalculator::default();

        let totals = calculator.set_field("accessories_name_extra_1", "300");

        assert_eq!(totals.total_accessories, Decimal::ZERO);
    }

    // =========================================================================
    // line 4 / line 5 tests
    // =========================================================================

    #[test]
    fn negative_trade_difference_flows_unclamped() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("car_price", "10000");

        let totals = calculator.set_field("tradein_price", "15000");

        assert_eq!(totals.trade_difference, dec!(-5000.00));
        assert_eq!(totals.subtotal, dec!(-5000.00));
        assert_eq!(totals.amount_due, dec!(-5000.00));
        assert_eq!(totals.monthly_payment, Decimal::ZERO);
    }

    // =========================================================================
    // line 6 tests
    // =========================================================================

    #[test]
    fn sales_tax_applies_to_taxed_templates() {
        for template in TAXED_TEMPLATES {
            let mut calculator = ContractCalculator::default();
            calculator.set_field("car_price", "1000");
            calculator.set_field("salestax_price", "6.625");

            let totals = calculator.set_field("contract_template", template);

            assert_eq!(totals.sales_tax, dec!(66.25), "template {template}");
        }
    }

    #[test]
    fn sales_tax_is_zero_for_other_templates() {
        for template in ["CA", "nj", " NJ", "", "TX"] {
            let mut calculator = ContractCalculator::default();
            calculator.set_field("car_price", "1000");
            calculator.set_field("salestax_price", "6.625");

            let totals = calculator.set_field("contract_template", template);

            assert_eq!(totals.sales_tax, Decimal::ZERO, "template {template:?}");
        }
    }

    #[test]
    fn sales_tax_is_zero_without_template() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("car_price", "1000");

        let totals = calculator.set_field("salestax_price", "6.625");

        assert_eq!(totals.sales_tax, Decimal::ZERO);
    }

    // =========================================================================
    // line 8 tests
    // =========================================================================

    #[test]
    fn monthly_payment_uses_configured_terms() {
        let terms = AmortizationTerms {
            annual_rate: dec!(0.06),
            term_years: 3,
        };
        let mut calculator = ContractCalculator::new(terms);

        let totals = calculator.set_field("car_price", "10000");

        assert_eq!(totals.monthly_payment, terms.monthly_payment(dec!(10000.00)));
        assert_eq!(totals.monthly_payment, dec!(304.22));
    }

    // =========================================================================
    // line item row tests
    // =========================================================================

    #[test]
    fn add_line_item_initializes_empty_row() {
        let mut calculator = ContractCalculator::default();

        let key = calculator.add_line_item(LineCategory::Accessories);

        assert_eq!(key, LineItemKey::new(LineCategory::Accessories, 1));
        assert_eq!(calculator.fields().text("accessories_name_extra_1"), Some(""));
        assert_eq!(calculator.fields().text("accessories_amount_extra_1"), Some("0"));
    }

    #[test]
    fn add_line_item_within_enforces_limit() {
        let mut calculator = ContractCalculator::default();
        for _ in 0..4 {
            calculator
                .add_line_item_within(LineCategory::Services, 4)
                .unwrap();
        }

        let result = calculator.add_line_item_within(LineCategory::Services, 4);

        assert_eq!(
            result,
            Err(LineItemError::LimitReached {
                category: LineCategory::Services,
                max: 4,
            })
        );
        assert!(calculator.add_line_item_within(LineCategory::Accessories, 4).is_ok());
    }

    #[test]
    fn remove_line_item_updates_totals_and_frees_slot() {
        let mut calculator = ContractCalculator::default();
        let first = calculator.add_line_item(LineCategory::Accessories);
        let second = calculator.add_line_item(LineCategory::Accessories);
        calculator.set_field(&first.amount_field(), "200");
        calculator.set_field(&second.amount_field(), "300");

        let totals = calculator.remove_line_item(first).unwrap();

        assert_eq!(totals.total_accessories, dec!(300.00));
        assert_eq!(calculator.fields().get("accessories_amount_extra_1"), None);
        assert_eq!(calculator.add_line_item(LineCategory::Accessories), first);
    }

    #[test]
    fn remove_missing_line_item_is_an_error() {
        let mut calculator = ContractCalculator::default();
        let key = LineItemKey::new(LineCategory::Services, 2);

        let result = calculator.remove_line_item(key);

        assert_eq!(result, Err(LineItemError::NotFound(key)));
    }

    // =========================================================================
    // lien, section toggle and reset tests
    // =========================================================================

    #[test]
    fn apply_lien_type_fills_preset_holder() {
        let mut calculator = ContractCalculator::default();

        calculator.apply_lien_type("credit_acceptance");

        assert_eq!(calculator.fields().text("lien_type"), Some("credit_acceptance"));
        assert_eq!(calculator.fields().text("lien_name"), Some("Credit Acceptance Corp."));
        assert_eq!(calculator.fields().text("lien_zip"), Some("48034"));
    }

    #[test]
    fn apply_cash_lien_type_clears_holder() {
        let mut calculator = ContractCalculator::default();
        calculator.apply_lien_type("westlake");

        calculator.apply_lien_type("cash");

        for field in LIEN_HOLDER_FIELDS {
            assert_eq!(calculator.fields().text(field), Some(""), "{field}");
        }
    }

    #[test]
    fn apply_other_lien_type_keeps_entered_holder() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("lien_name", "Hometown Credit Union");

        calculator.apply_lien_type("other");

        assert_eq!(calculator.fields().text("lien_name"), Some("Hometown Credit Union"));
    }

    #[test]
    fn tradein_toggle_off_drops_stale_trade_in() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("car_price", "25000");
        calculator.apply_tradein_toggle(true);
        calculator.set_field("tradein_make", "Toyota");
        calculator.set_field("tradein_price", "5000");
        assert_eq!(calculator.totals().trade_in_value, dec!(5000.00));

        let totals = calculator.apply_tradein_toggle(false);

        assert_eq!(totals.trade_in_value, Decimal::ZERO);
        assert_eq!(totals.trade_difference, dec!(25000.00));
        assert_eq!(calculator.fields().text("tradein_make"), Some(""));
        assert_eq!(calculator.fields().get("tradein_toggle"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn tradein_toggle_on_keeps_entered_values() {
        let mut calculator = ContractCalculator::default();
        calculator.set_field("tradein_price", "4000");

        let totals = calculator.apply_tradein_toggle(true);

        assert_eq!(totals.trade_in_value, dec!(4000.00));
        assert!(calculator.fields().is_truthy("tradein_toggle"));
    }

    #[test]
    fn cobuyer_toggle_off_blanks_cobuyer_section() {
        let mut calculator = ContractCalculator::default();
        calculator.apply_cobuyer_toggle(true);
        for field in COBUYER_SECTION_FIELDS {
            calculator.set_field(field, "x");
        }
        calculator.set_field("full_name", "Jordan Rivera");

        calculator.apply_cobuyer_toggle(false);

        for field in COBUYER_SECTION_FIELDS {
            assert_eq!(calculator.fields().text(field), Some(""), "{field}");
        }
        assert_eq!(calculator.fields().text("full_name"), Some("Jordan Rivera"));
        assert!(!calculator.fields().is_truthy("cobuyer_toggle"));
    }

    // =========================================================================
    // field capture tests
    // =========================================================================

    #[test]
    fn remove_field_recomputes_totals() {
        let mut calculator = nj_deal();

        let totals = calculator.remove_field("docfee_amount");

        assert_eq!(totals.doc_fee, Decimal::ZERO);
        assert_eq!(totals.subtotal, dec!(20000.00));
        assert_eq!(calculator.fields().get("docfee_amount"), None);
    }

    #[test]
    fn new_calculator_keeps_its_terms() {
        let terms = AmortizationTerms {
            annual_rate: dec!(0.07),
            term_years: 4,
        };

        let calculator = ContractCalculator::new(terms);

        assert_eq!(calculator.terms(), &terms);
        assert_eq!(ContractCalculator::default().terms(), &AmortizationTerms::default());
    }

    #[test]
    fn reset_clears_fields_and_totals() {
        let mut calculator = nj_deal();

        calculator.reset();

        assert!(calculator.fields().is_empty());
        assert_eq!(calculator.totals(), &TotalsRecord::default());
    }
}
