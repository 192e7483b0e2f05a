use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_currency;

/// Every total derived from the current form values.
///
/// Monetary fields are rounded to the cent. `sales_tax_rate` is the raw
/// percentage entered on the form (e.g. `6.625`) and is not rounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRecord {
    pub car_price: Decimal,
    pub trade_in_value: Decimal,
    pub deposit_amount: Decimal,
    pub down_payment: Decimal,
    pub doc_fee: Decimal,
    pub lo_jack_fee: Decimal,
    pub sales_tax_rate: Decimal,
    pub dynamic_accessories: Decimal,
    pub total_accessories: Decimal,
    pub dynamic_services: Decimal,
    pub total_service: Decimal,
    pub trade_difference: Decimal,
    pub subtotal: Decimal,
    pub sales_tax: Decimal,
    pub amount_due: Decimal,
    pub monthly_payment: Decimal,
}

impl TotalsRecord {
    /// The monetary totals under their submission names, `salesTaxRate` excluded.
    pub fn monetary_entries(&self) -> [(&'static str, Decimal); 15] {
        [
            ("carPrice", self.car_price),
            ("tradeInValue", self.trade_in_value),
            ("depositAmount", self.deposit_amount),
            ("downPayment", self.down_payment),
            ("docFee", self.doc_fee),
            ("loJackFee", self.lo_jack_fee),
            ("dynamicAccessories", self.dynamic_accessories),
            ("totalAccessories", self.total_accessories),
            ("dynamicServices", self.dynamic_services),
            ("totalService", self.total_service),
            ("tradeDifference", self.trade_difference),
            ("subtotal", self.subtotal),
            ("salesTax", self.sales_tax),
            ("amountDue", self.amount_due),
            ("monthlyPayment", self.monthly_payment),
        ]
    }
}

/// Display variant of [`TotalsRecord`] with every amount rendered as currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub car_price: String,
    pub trade_in_value: String,
    pub deposit_amount: String,
    pub down_payment: String,
    pub doc_fee: String,
    pub lo_jack_fee: String,
    pub sales_tax_rate: String,
    pub total_accessories: String,
    pub total_service: String,
    pub trade_difference: String,
    pub subtotal: String,
    pub sales_tax: String,
    pub amount_due: String,
    pub monthly_payment: String,
}

impl From<&TotalsRecord> for FormattedTotals {
    fn from(totals: &TotalsRecord) -> Self {
        Self {
            car_price: format_currency(totals.car_price),
            trade_in_value: format_currency(totals.trade_in_value),
            deposit_amount: format_currency(totals.deposit_amount),
            down_payment: format_currency(totals.down_payment),
            doc_fee: format_currency(totals.doc_fee),
            lo_jack_fee: format_currency(totals.lo_jack_fee),
            sales_tax_rate: format!("{}%", totals.sales_tax_rate.normalize()),
            total_accessories: format_currency(totals.total_accessories),
            total_service: format_currency(totals.total_service),
            trade_difference: format_currency(totals.trade_difference),
            subtotal: format_currency(totals.subtotal),
            sales_tax: format_currency(totals.sales_tax),
            amount_due: format_currency(totals.amount_due),
            monthly_payment: format_currency(totals.monthly_payment),
        }
    }
}

impl FormattedTotals {
    /// Labelled rows in the order the financial summary presents them.
    pub fn rows(&self) -> [(&'static str, &str); 14] {
        [
            ("Car Price", self.car_price.as_str()),
            ("Trade-in Value", self.trade_in_value.as_str()),
            ("Trade Difference", self.trade_difference.as_str()),
            ("Total Accessories", self.total_accessories.as_str()),
            ("Doc Fee", self.doc_fee.as_str()),
            ("LoJack Fee", self.lo_jack_fee.as_str()),
            ("Total Service Contract", self.total_service.as_str()),
            ("Subtotal", self.subtotal.as_str()),
            ("Deposit", self.deposit_amount.as_str()),
            ("Down Payment", self.down_payment.as_str()),
            ("Sales Tax Rate", self.sales_tax_rate.as_str()),
            ("Sales Tax", self.sales_tax.as_str()),
            ("Balance Due", self.amount_due.as_str()),
            ("Est. Monthly Payment", self.monthly_payment.as_str()),
        ]
    }
}
