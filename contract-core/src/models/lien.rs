/// A finance company whose address block is filled in from a lien type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LienHolder {
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip: &'static str,
}

/// Lien type meaning the vehicle is paid outright; no lien holder applies.
pub const CASH_LIEN_TYPE: &str = "cash";

/// Form fields that make up the lien holder block, in form order.
pub const LIEN_HOLDER_FIELDS: [&str; 5] = [
    "lien_name",
    "lien_address",
    "lien_city",
    "lien_state",
    "lien_zip",
];

const PRESETS: [(&str, LienHolder); 3] = [
    (
        "credit_acceptance",
        LienHolder {
            name: "Credit Acceptance Corp.",
            address: "25505 West 12 Mile Rd.",
            city: "Southfield",
            state: "MI",
            zip: "48034",
        },
    ),
    (
        "westlake",
        LienHolder {
            name: "Westlake Financial Services",
            address: "P.O. Box 997592",
            city: "Sacramento",
            state: "CA",
            zip: "95899",
        },
    ),
    (
        "western_funding",
        LienHolder {
            name: "Western Funding",
            address: "3915 E. Patrick Lane",
            city: "Las Vegas",
            state: "NV",
            zip: "89120",
        },
    ),
];

impl LienHolder {
    /// The known lien holder for a `lien_type` value, if any.
    pub fn preset(lien_type: &str) -> Option<&'static LienHolder> {
        PRESETS
            .iter()
            .find(|(code, _)| *code == lien_type)
            .map(|(_, holder)| holder)
    }

    /// Field values in the order of [`LIEN_HOLDER_FIELDS`].
    pub fn field_values(&self) -> [(&'static str, &'static str); 5] {
        [
            (LIEN_HOLDER_FIELDS[0], self.name),
            (LIEN_HOLDER_FIELDS[1], self.address),
            (LIEN_HOLDER_FIELDS[2], self.city),
            (LIEN_HOLDER_FIELDS[3], self.state),
            (LIEN_HOLDER_FIELDS[4], self.zip),
        ]
    }
}
