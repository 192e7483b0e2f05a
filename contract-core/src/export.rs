//! The flat record handed to the document webhook.
//!
//! Raw fields and computed totals are merged into one map. Every monetary
//! value, whether typed by the user or derived, becomes a `"$1,234.50"`
//! string; rates and non-monetary text pass through unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::calculations::common::{format_currency, parse_number};
use crate::models::{FieldStore, FieldValue, LineCategory, TotalsRecord};

/// Raw inputs that hold a dollar amount.
pub const CURRENCY_FIELDS: [&str; 6] = [
    "car_price",
    "tradein_price",
    "deposit_price",
    "down_payment",
    "docfee_amount",
    "lo_jack_amount",
];

const AS_IS_WARRANTY: &str = "AS_IS";
const FULL_WARRANTY: &str = "WARRANTY";
const MARK: &str = "X";

/// Serializes as a single JSON object of field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, Value>);

impl Submission {
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value under `key` if it is a JSON string.
    pub fn get_str(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Whether a raw field holds a dollar amount.
pub fn is_currency_field(name: &str) -> bool {
    CURRENCY_FIELDS.contains(&name) || LineCategory::of_amount_field(name).is_some()
}

/// Merges `fields` and `totals` into the submission record.
pub fn build_submission(
    fields: &FieldStore,
    totals: &TotalsRecord,
    calculated_at: DateTime<Utc>,
) -> Submission {
    let mut record = BTreeMap::new();

    for (name, value) in fields.iter() {
        let exported = if is_currency_field(&name) {
            let amount = value.as_text().map(parse_number).unwrap_or_default();
            Value::String(format_currency(amount))
        } else {
            match value {
                FieldValue::Flag(flag) => Value::Bool(*flag),
                FieldValue::Text(text) => Value::String(text.clone()),
            }
        };
        record.insert(name, exported);
    }

    for (name, amount) in totals.monetary_entries() {
        record.insert(name.to_string(), Value::String(format_currency(amount)));
    }
    record.insert(
        "salesTaxRate".to_string(),
        Value::String(totals.sales_tax_rate.normalize().to_string()),
    );

    record.insert(
        "trade_diff".to_string(),
        Value::String(format_currency(totals.trade_difference)),
    );
    record.insert(
        "duenow_price".to_string(),
        Value::String(format_currency(totals.amount_due)),
    );

    let warranty = fields.text("warranty_type");
    record.insert(
        "as_is_mark".to_string(),
        Value::String(mark_if(warranty == Some(AS_IS_WARRANTY))),
    );
    record.insert(
        "warranty_mark".to_string(),
        Value::String(mark_if(warranty == Some(FULL_WARRANTY))),
    );

    record.insert(
        "calculated_at".to_string(),
        Value::String(calculated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    Submission(record)
}

fn mark_if(condition: bool) -> String {
    if condition {
        MARK.to_string()
    } else {
        String::new()
    }
}
