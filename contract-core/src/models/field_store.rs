use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LINE_ITEM_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(accessories|services)_(name|amount)_extra_([1-9][0-9]*)$")
        .expect("line item key pattern is valid")
});

/// A raw value captured from the form: free text or a checkbox flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    /// The text content, or `None` for a flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// Absent-equivalent: a `false` flag or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flag(b) => !b,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Whether the value switches a conditional section on.
    ///
    /// Text is truthy unless blank or one of `false`, `0`, `off`, `no`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Text(s) => {
                let s = s.trim();
                !s.is_empty()
                    && !["false", "0", "off", "no"]
                        .iter()
                        .any(|falsy| s.eq_ignore_ascii_case(falsy))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Category of a user-added line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Accessories,
    Services,
}

impl LineCategory {
    pub const ALL: [LineCategory; 2] = [LineCategory::Accessories, LineCategory::Services];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accessories => "accessories",
            Self::Services => "services",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accessories" => Some(Self::Accessories),
            "services" => Some(Self::Services),
            _ => None,
        }
    }

    /// Leading part shared by every amount key of this category.
    pub fn amount_prefix(&self) -> &'static str {
        match self {
            Self::Accessories => "accessories_amount_extra_",
            Self::Services => "services_amount_extra_",
        }
    }

    /// The category whose amount prefix `field` starts with, whatever follows it.
    pub fn of_amount_field(field: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| field.starts_with(category.amount_prefix()))
    }
}

impl fmt::Display for LineCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a line item a flat field key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePart {
    Name,
    Amount,
}

/// Identifies one line item slot, e.g. `accessories` slot `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineItemKey {
    pub category: LineCategory,
    pub slot: u32,
}

impl LineItemKey {
    pub fn new(
        category: LineCategory,
        slot: u32,
    ) -> Self {
        Self { category, slot }
    }

    /// Splits a flat key such as `services_amount_extra_3` into its slot and part.
    ///
    /// Returns `None` for anything that is not a canonical line item key,
    /// including slot `0` and zero-padded slots.
    pub fn parse(field: &str) -> Option<(Self, LinePart)> {
        let caps = LINE_ITEM_KEY.captures(field)?;
        let category = LineCategory::parse(&caps[1])?;
        let part = match &caps[2] {
            "name" => LinePart::Name,
            _ => LinePart::Amount,
        };
        let slot = caps[3].parse().ok()?;
        Some((Self { category, slot }, part))
    }

    pub fn name_field(&self) -> String {
        format!("{}_name_extra_{}", self.category, self.slot)
    }

    pub fn amount_field(&self) -> String {
        format!("{}_amount_extra_{}", self.category, self.slot)
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} slot {}", self.category, self.slot)
    }
}

/// The two raw values of a line item slot. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub name: Option<FieldValue>,
    pub amount: Option<FieldValue>,
}

impl LineItem {
    fn part(
        &self,
        part: LinePart,
    ) -> Option<&FieldValue> {
        match part {
            LinePart::Name => self.name.as_ref(),
            LinePart::Amount => self.amount.as_ref(),
        }
    }

    fn part_mut(
        &mut self,
        part: LinePart,
    ) -> &mut Option<FieldValue> {
        match part {
            LinePart::Name => &mut self.name,
            LinePart::Amount => &mut self.amount,
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none()
    }
}

/// All current raw form values, keyed by field name.
///
/// Line item keys with a canonical slot number are kept in a typed sparse
/// map; every other key is stored verbatim. Amount keys with an odd suffix
/// (`_extra_0`, `_extra_01`, slots past `u32::MAX`) land in the verbatim map
/// but still count toward their category in [`line_amounts`](Self::line_amounts).
/// Reads and writes through flat keys behave the same either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    scalars: BTreeMap<String, FieldValue>,
    line_items: BTreeMap<LineItemKey, LineItem>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set(
        &mut self,
        name: &str,
        value: FieldValue,
    ) {
        match LineItemKey::parse(name) {
            Some((key, part)) => {
                *self.line_items.entry(key).or_default().part_mut(part) = Some(value);
            }
            None => {
                self.scalars.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&FieldValue> {
        match LineItemKey::parse(name) {
            Some((key, part)) => self.line_items.get(&key).and_then(|item| item.part(part)),
            None => self.scalars.get(name),
        }
    }

    /// The text stored under `name`, or `None` when absent or a flag.
    pub fn text(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn is_truthy(
        &self,
        name: &str,
    ) -> bool {
        self.get(name).is_some_and(FieldValue::is_truthy)
    }

    /// Removes `name`, returning its previous value.
    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<FieldValue> {
        match LineItemKey::parse(name) {
            Some((key, part)) => {
                let item = self.line_items.get_mut(&key)?;
                let previous = item.part_mut(part).take();
                if item.is_empty() {
                    self.line_items.remove(&key);
                }
                previous
            }
            None => self.scalars.remove(name),
        }
    }

    /// Removes both halves of a line item slot.
    pub fn remove_line_item(
        &mut self,
        key: LineItemKey,
    ) -> Option<LineItem> {
        self.line_items.remove(&key)
    }

    pub fn line_item(
        &self,
        key: LineItemKey,
    ) -> Option<&LineItem> {
        self.line_items.get(&key)
    }

    /// Slots of `category` in ascending order.
    pub fn line_items(
        &self,
        category: LineCategory,
    ) -> impl Iterator<Item = (u32, &LineItem)> {
        self.line_items
            .iter()
            .filter(move |(key, _)| key.category == category)
            .map(|(key, item)| (key.slot, item))
    }

    /// Every amount entered for `category`: canonical slots in ascending
    /// order, then any other key carrying the category's amount prefix.
    pub fn line_amounts(
        &self,
        category: LineCategory,
    ) -> impl Iterator<Item = &FieldValue> {
        let prefix = category.amount_prefix();
        let slots = self
            .line_items(category)
            .filter_map(|(_, item)| item.amount.as_ref());
        let stray = self
            .scalars
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(|(_, value)| value);
        slots.chain(stray)
    }

    /// Lowest slot number of `category` not currently in use.
    pub fn next_free_slot(
        &self,
        category: LineCategory,
    ) -> u32 {
        let mut slot = 1;
        for (used, _) in self.line_items(category) {
            if used != slot {
                break;
            }
            slot += 1;
        }
        slot
    }

    /// Every field as a flat `(name, value)` pair, line items included.
    pub fn iter(&self) -> impl Iterator<Item = (String, &FieldValue)> {
        let scalars = self
            .scalars
            .iter()
            .map(|(name, value)| (name.clone(), value));
        let items = self.line_items.iter().flat_map(|(key, item)| {
            let name = item.name.as_ref().map(|v| (key.name_field(), v));
            let amount = item.amount.as_ref().map(|v| (key.amount_field(), v));
            name.into_iter().chain(amount)
        });
        scalars.chain(items)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.line_items.is_empty()
    }

    pub fn clear(&mut self) {
        self.scalars.clear();
        self.line_items.clear();
    }
}
