use std::io::Read;

use contract_core::{ContractCalculator, FieldValue};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading form field data.
#[derive(Debug, Error)]
pub enum FieldLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Empty field name on record {0}")]
    EmptyFieldName(usize),
}

impl From<csv::Error> for FieldLoaderError {
    fn from(err: csv::Error) -> Self {
        FieldLoaderError::CsvParse(err.to_string())
    }
}

/// A single `field,value` row of a form capture file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldRecord {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

impl FieldRecord {
    /// The raw value to store: `*_toggle` fields holding `true`/`false`
    /// become flags, everything else is text.
    pub fn to_value(&self) -> FieldValue {
        if self.field.ends_with("_toggle") {
            let value = self.value.trim();
            if value.eq_ignore_ascii_case("true") {
                return FieldValue::Flag(true);
            }
            if value.eq_ignore_ascii_case("false") {
                return FieldValue::Flag(false);
            }
        }
        FieldValue::Text(self.value.clone())
    }
}

/// Loader for captured form values from CSV files.
///
/// The CSV has a `field,value` header and one row per form field. Rows are
/// replayed into a [`ContractCalculator`] in file order, the same way the
/// form delivers one edit at a time.
pub struct FieldLoader;

impl FieldLoader {
    /// Parse field records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FieldRecord>, FieldLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: FieldRecord = result?;
            if record.field.trim().is_empty() {
                return Err(FieldLoaderError::EmptyFieldName(index + 1));
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Replay records into `calculator`, returning how many were applied.
    ///
    /// A `lien_type` row also fills in the lien holder block for known
    /// finance companies, and a `cobuyer_toggle` or `tradein_toggle` row that
    /// switches its section off blanks the section's inputs.
    pub fn apply(
        calculator: &mut ContractCalculator,
        records: &[FieldRecord],
    ) -> usize {
        for record in records {
            let field = record.field.trim();
            match field {
                "lien_type" => {
                    calculator.apply_lien_type(record.value.trim());
                }
                "cobuyer_toggle" => {
                    calculator.apply_cobuyer_toggle(record.to_value().is_truthy());
                }
                "tradein_toggle" => {
                    calculator.apply_tradein_toggle(record.to_value().is_truthy());
                }
                _ => {
                    calculator.set_field(field, record.to_value());
                }
            }
        }
        debug!(records = records.len(), "applied field records");
        records.len()
    }
}
