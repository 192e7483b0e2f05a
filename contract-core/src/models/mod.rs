mod field_store;
mod lien;
mod totals;

pub use field_store::{FieldStore, FieldValue, LineCategory, LineItem, LineItemKey, LinePart};
pub use lien::{CASH_LIEN_TYPE, LIEN_HOLDER_FIELDS, LienHolder};
pub use totals::{FormattedTotals, TotalsRecord};
