//! Required-field checks run before a contract is submitted.
//!
//! The base list always applies. The co-buyer, lien holder and trade-in
//! groups are appended, in that order, when their section is switched on.

use serde::Serialize;

use crate::models::{CASH_LIEN_TYPE, FieldStore, FieldValue, LIEN_HOLDER_FIELDS};

/// Fields every contract needs, in form order.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "full_name",
    "buyer_dob",
    "buyer_license",
    "buyer_address",
    "buyer_city",
    "buyer_state",
    "buyer_zip",
    "buyer_cellphone",
    "car_year",
    "car_make",
    "car_model",
    "car_vin",
    "car_price",
    "contract_template",
];

/// Required when `cobuyer_toggle` is on.
pub const COBUYER_FIELDS: [&str; 8] = [
    "cobuyerfull_name",
    "cobuyer_dob",
    "cobuyer_license",
    "cobuyer_address",
    "cobuyer_city",
    "cobuyer_state",
    "cobuyer_zip",
    "cobuyer_cellphone",
];

/// Required when `tradein_toggle` is on.
pub const TRADEIN_FIELDS: [&str; 4] = [
    "tradein_year",
    "tradein_make",
    "tradein_model",
    "tradein_price",
];

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// One human-readable message per missing field.
    pub errors: Vec<String>,
    /// The missing field names, parallel to `errors`.
    pub missing_fields: Vec<&'static str>,
}

/// The required field list for the current form state.
pub fn required_fields(fields: &FieldStore) -> Vec<&'static str> {
    let mut required = REQUIRED_FIELDS.to_vec();

    if fields.is_truthy("cobuyer_toggle") {
        required.extend(COBUYER_FIELDS);
    }

    let financed = fields
        .get("lien_type")
        .is_some_and(|lien_type| {
            !lien_type.is_blank() && lien_type.as_text() != Some(CASH_LIEN_TYPE)
        });
    if financed {
        required.extend(LIEN_HOLDER_FIELDS);
    }

    if fields.is_truthy("tradein_toggle") {
        required.extend(TRADEIN_FIELDS);
    }

    required
}

/// Reports every required field that is absent or blank.
pub fn validate(fields: &FieldStore) -> ValidationReport {
    let missing_fields: Vec<&'static str> = required_fields(fields)
        .into_iter()
        .filter(|field| fields.get(field).is_none_or(FieldValue::is_blank))
        .collect();
    let errors = missing_fields
        .iter()
        .map(|field| format!("{} is required", field_label(field)))
        .collect();

    ValidationReport {
        is_valid: missing_fields.is_empty(),
        errors,
        missing_fields,
    }
}

/// Human-readable label for a field name, e.g. `lien_zip` → `Lien Holder zip`.
pub fn field_label(field: &str) -> String {
    let label = field
        .replace('_', " ")
        .replacen("cobuyer", "Co-buyer", 1)
        .replacen("lien", "Lien Holder", 1)
        .replacen("tradein", "Trade-in", 1);

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
